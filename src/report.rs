//! 照合レポート
//!
//! 表示・エクスポート用に照合結果とグループ情報をまとめる

use serde::Serialize;
use std::collections::BTreeSet;
use tg_overlap_common::{
    explorer_link, telegram_link, Analysis, Diagnostic, ExtractionMode, GroupExtraction,
    WalletKind,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: String,
    pub extraction_mode: ExtractionMode,
    pub keyword_policy: String,
    pub group_a: GroupSummary,
    pub group_b: GroupSummary,
    /// 両グループに画像がない場合はNone（未照合）
    pub username_overlap: Option<Vec<UserEntry>>,
    pub wallet_overlap: Option<Vec<WalletEntry>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub label: String,
    pub source: String,
    pub image_count: usize,
    pub usernames: BTreeSet<String>,
    pub wallets: BTreeSet<String>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntry {
    pub username: String,
    pub suspicious: bool,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletEntry {
    pub wallet: String,
    pub kind: Option<WalletKind>,
    pub link: Option<String>,
}

impl WalletEntry {
    pub fn new(wallet: &str) -> Self {
        Self {
            wallet: wallet.to_string(),
            kind: WalletKind::of(wallet),
            link: explorer_link(wallet),
        }
    }
}

/// レポート生成の入力
pub struct ReportInput<'a> {
    pub analysis: &'a Analysis,
    pub group_a: &'a GroupExtraction,
    pub group_b: &'a GroupExtraction,
    pub source_a: &'a str,
    pub source_b: &'a str,
    pub extraction_mode: ExtractionMode,
    pub keyword_policy: &'a str,
}

impl Report {
    pub fn build(input: ReportInput<'_>) -> Self {
        let analysis = input.analysis;

        let username_overlap = analysis.username_overlap.as_ref().map(|users| {
            users
                .iter()
                .map(|u| UserEntry {
                    username: u.username.clone(),
                    suspicious: u.suspicious,
                    link: telegram_link(&u.username),
                })
                .collect()
        });

        let wallet_overlap = analysis
            .wallet_overlap
            .as_ref()
            .map(|wallets| wallets.iter().map(|w| WalletEntry::new(w)).collect());

        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            extraction_mode: input.extraction_mode,
            keyword_policy: input.keyword_policy.to_string(),
            group_a: GroupSummary {
                label: "A".into(),
                source: input.source_a.to_string(),
                image_count: input.group_a.image_count,
                usernames: input.group_a.identifiers.usernames.clone(),
                wallets: input.group_a.identifiers.wallets(),
                diagnostics: input.group_a.diagnostics.clone(),
            },
            // グループBは手入力ウォレット取り込み後の集合を使う
            group_b: GroupSummary {
                label: "B".into(),
                source: input.source_b.to_string(),
                image_count: input.group_b.image_count,
                usernames: analysis.group_b.usernames.clone(),
                wallets: analysis.group_b.wallets(),
                diagnostics: input.group_b.diagnostics.clone(),
            },
            username_overlap,
            wallet_overlap,
        }
    }

    pub fn overlap_usernames(&self) -> BTreeSet<String> {
        self.username_overlap
            .iter()
            .flatten()
            .map(|u| u.username.clone())
            .collect()
    }

    pub fn overlap_wallets(&self) -> BTreeSet<String> {
        self.wallet_overlap
            .iter()
            .flatten()
            .map(|w| w.wallet.clone())
            .collect()
    }

    pub fn has_overlap(&self) -> bool {
        !self.overlap_usernames().is_empty() || !self.overlap_wallets().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tg_overlap_common::{analyze, AnalysisOutcome, Extractor, SuspicionScorer};

    fn group(text: &str) -> GroupExtraction {
        GroupExtraction {
            image_count: 1,
            identifiers: Extractor::default().extract(text),
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn test_build_report_links() {
        let a = group("@bot_admin99\nrAAAA1111");
        let b = group("@bot_admin99\nrAAAA1111");
        let scorer = SuspicionScorer::new("default", ["admin".to_string()].into_iter().collect());
        let AnalysisOutcome::Completed(analysis) = analyze(&a, &b, &BTreeSet::new(), &scorer) else {
            panic!("照合が実行されていない");
        };

        let report = Report::build(ReportInput {
            analysis: &analysis,
            group_a: &a,
            group_b: &b,
            source_a: "coin_a",
            source_b: "coin_b",
            extraction_mode: ExtractionMode::AnchoredMulti,
            keyword_policy: "default",
        });

        let users = report.username_overlap.as_ref().unwrap();
        assert_eq!(users[0].link, "https://t.me/bot_admin99");
        assert!(users[0].suspicious);

        let wallets = report.wallet_overlap.as_ref().unwrap();
        assert_eq!(wallets[0].wallet, "rAAAA1111");
        assert_eq!(wallets[0].kind, Some(WalletKind::Fragment));
        assert_eq!(wallets[0].link, None);

        assert!(report.has_overlap());
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"usernameOverlap\""));
        assert!(json.contains("\"generatedAt\""));
    }
}
