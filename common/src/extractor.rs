//! OCRテキスト → 識別子の抽出パイプライン
//!
//! 行ごとに:
//! 1. トリムして空行を捨てる
//! 2. 全行からウォレット断片を抽出
//! 3. ノイズ行以外からユーザー名を抽出

use crate::classifier::is_noise_line;
use crate::types::IdentifierSet;
use crate::username::{extract_usernames, ExtractionMode};
use crate::wallet::{extract_full_wallet_tokens, extract_wallet_fragments};
use serde::{Deserialize, Serialize};

/// 抽出設定
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractorConfig {
    pub mode: ExtractionMode,
    /// OCRテキストのトークンから完全アドレスも拾う
    pub scan_full_wallets: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// 1画像分のOCRテキストから識別子を抽出
    pub fn extract(&self, raw_text: &str) -> IdentifierSet {
        let mut ids = IdentifierSet::new();

        for line in raw_text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            ids.wallet_fragments.extend(extract_wallet_fragments(line));

            if self.config.scan_full_wallets {
                ids.full_wallets.extend(extract_full_wallet_tokens(line));
            }

            if !is_noise_line(line) {
                ids.usernames.extend(extract_usernames(line, self.config.mode));
            }
        }

        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchored() -> Extractor {
        Extractor::new(ExtractorConfig::default())
    }

    #[test]
    fn test_extract_group_a_sample() {
        let ids = anchored().extract("@cryptoking123\nLast seen recently\n@bot_admin99");
        let names: Vec<&str> = ids.usernames.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["bot_admin99", "cryptoking123"]);
    }

    #[test]
    fn test_noise_line_contributes_no_usernames() {
        let ids = anchored().extract("last seen @bot_admin99 yesterday");
        assert!(ids.usernames.is_empty());

        let loose = Extractor::new(ExtractorConfig {
            mode: ExtractionMode::FirstTokenOnly,
            ..Default::default()
        });
        // "seen" で始まる行は先頭トークンも採用しない
        assert!(loose.extract("seen_recently_bot").usernames.is_empty());
    }

    #[test]
    fn test_noise_line_still_scanned_for_wallets() {
        let ids = anchored().extract("Last seen rH7x9K2mQP");
        assert!(ids.usernames.is_empty());
        assert!(ids.wallet_fragments.contains("rH7x9K2mQ"));
    }

    #[test]
    fn test_blank_and_padded_lines() {
        let ids = anchored().extract("\n\n   @padded_user   \n\t\n");
        assert!(ids.usernames.contains("padded_user"));
        assert_eq!(ids.usernames.len(), 1);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "@alpha_one\nrAAAA1111 @beta_two\nLaatst gezien @gamma_three";
        let extractor = anchored();
        assert_eq!(extractor.extract(text), extractor.extract(text));
    }

    #[test]
    fn test_full_wallet_scan_toggle() {
        let text = "deposit rXVZPqwert123456789ABCDEfgh";
        assert!(anchored().extract(text).full_wallets.is_empty());

        let scanning = Extractor::new(ExtractorConfig {
            scan_full_wallets: true,
            ..Default::default()
        });
        let ids = scanning.extract(text);
        assert!(ids.full_wallets.contains("rXVZPqwert123456789ABCDEfgh"));
        // 断片も同時に拾われる
        assert!(ids.wallet_fragments.contains("rXVZPqwer"));
    }

    #[test]
    fn test_first_token_mode() {
        let loose = Extractor::new(ExtractorConfig {
            mode: ExtractionMode::FirstTokenOnly,
            ..Default::default()
        });
        let ids = loose.extract("cryptoking123 online\n@bot_admin99 typing\nhi there @ignored_user");
        let names: Vec<&str> = ids.usernames.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["bot_admin99", "cryptoking123"]);
    }
}
