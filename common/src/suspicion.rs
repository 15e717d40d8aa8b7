//! 疑わしいユーザー名の判定
//!
//! キーワードは設定データとして外部から渡す（ポリシー名 → キーワード集合）。
//! 判定は小文字化したユーザー名に対する部分文字列一致。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// ユーザー名がいずれかのキーワードを含むか（大文字小文字を区別しない）
pub fn is_suspicious(username: &str, keywords: &BTreeSet<String>) -> bool {
    let lower = username.to_lowercase();
    keywords
        .iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .any(|keyword| lower.contains(keyword.as_str()))
}

/// キーワードを正規化（前後空白除去・小文字化・空要素を捨てる）
fn normalize_keywords<I, S>(keywords: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// ポリシー名ごとのキーワード集合
///
/// 設定ファイルから読み込んだ場合も `insert` と同じ正規化を通す
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, BTreeSet<String>>",
    into = "BTreeMap<String, BTreeSet<String>>"
)]
pub struct KeywordPolicies(BTreeMap<String, BTreeSet<String>>);

impl From<BTreeMap<String, BTreeSet<String>>> for KeywordPolicies {
    fn from(raw: BTreeMap<String, BTreeSet<String>>) -> Self {
        let mut policies = Self::new();
        for (name, keywords) in raw {
            policies.insert(&name, keywords);
        }
        policies
    }
}

impl From<KeywordPolicies> for BTreeMap<String, BTreeSet<String>> {
    fn from(policies: KeywordPolicies) -> Self {
        policies.0
    }
}

impl KeywordPolicies {
    pub fn new() -> Self {
        Self::default()
    }

    /// 観測された2種類のキーワードリスト
    pub fn builtin() -> Self {
        let mut policies = Self::new();
        policies.insert(
            "default",
            ["airdrop", "pump", "scam", "bot", "admin", "mod", "giveaway"],
        );
        policies.insert("shill", ["shill", "shibo", "winner", "winners"]);
        policies
    }

    /// ポリシーを追加（キーワードは小文字化して保持）
    pub fn insert<I, S>(&mut self, name: &str, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.0.insert(name.to_string(), normalize_keywords(keywords));
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.0.get(name)
    }

    /// ポリシー名からスコアラーを構築
    pub fn scorer(&self, name: &str) -> Result<SuspicionScorer> {
        let keywords = self
            .get(name)
            .ok_or_else(|| Error::UnknownPolicy(name.to_string()))?;
        let scorer = SuspicionScorer::new(name, keywords.clone());
        if scorer.keywords().is_empty() {
            return Err(Error::Config(format!("キーワードポリシー「{}」が空です", name)));
        }
        Ok(scorer)
    }
}

/// 有効なキーワード集合を保持するスコアラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspicionScorer {
    policy: String,
    keywords: BTreeSet<String>,
}

impl SuspicionScorer {
    pub fn new(policy: &str, keywords: BTreeSet<String>) -> Self {
        Self {
            policy: policy.to_string(),
            keywords: normalize_keywords(keywords),
        }
    }

    pub fn policy(&self) -> &str {
        &self.policy
    }

    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    pub fn is_suspicious(&self, username: &str) -> bool {
        is_suspicious(username, &self.keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_substring_match() {
        let kw = keywords(&["admin"]);
        assert!(is_suspicious("bot_admin99", &kw));
        assert!(!is_suspicious("cryptoking123", &kw));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_suspicious("AirDropKing", &keywords(&["airdrop"])));
        assert!(is_suspicious("pumpit", &keywords(&["PUMP"])));
    }

    #[test]
    fn test_empty_keywords_never_suspicious() {
        assert!(!is_suspicious("scam_admin", &BTreeSet::new()));
        // 空文字列のキーワードは全件一致にならない
        assert!(!is_suspicious("cryptoking123", &keywords(&["", "  "])));
        assert!(is_suspicious("bot_admin99", &keywords(&[" admin "])));
    }

    #[test]
    fn test_builtin_policies() {
        let policies = KeywordPolicies::builtin();
        let names: Vec<&str> = policies.names().collect();
        assert_eq!(names, vec!["default", "shill"]);

        let default = policies.scorer("default").unwrap();
        assert!(default.is_suspicious("free_giveaway_now"));
        assert!(default.is_suspicious("ModeratorX"));
        assert!(!default.is_suspicious("shill_winner"));

        let shill = policies.scorer("shill").unwrap();
        assert!(shill.is_suspicious("shill_winner"));
        assert!(!shill.is_suspicious("bot_admin99"));
    }

    #[test]
    fn test_unknown_policy() {
        let policies = KeywordPolicies::builtin();
        let err = policies.scorer("memecoin").unwrap_err();
        assert!(matches!(err, Error::UnknownPolicy(name) if name == "memecoin"));
    }

    #[test]
    fn test_empty_policy_is_config_error() {
        let mut policies = KeywordPolicies::new();
        policies.insert("blank", ["", "  "]);
        assert!(matches!(policies.scorer("blank"), Err(Error::Config(_))));
    }

    #[test]
    fn test_policies_serde_transparent() {
        let json = r#"{"custom": ["Rug", "honeypot"]}"#;
        let policies: KeywordPolicies = serde_json::from_str(json).unwrap();
        let scorer = policies.scorer("custom").unwrap();
        assert!(scorer.is_suspicious("rugpull_dev"));
        assert_eq!(scorer.policy(), "custom");
        assert_eq!(policies.get("custom"), Some(&keywords(&["honeypot", "rug"])));
    }

    #[test]
    fn test_policies_from_json_are_normalized() {
        let json = r#"{"default": ["", " Admin "]}"#;
        let policies: KeywordPolicies = serde_json::from_str(json).unwrap();
        assert_eq!(policies.get("default"), Some(&keywords(&["admin"])));

        let scorer = policies.scorer("default").unwrap();
        assert!(scorer.is_suspicious("bot_admin99"));
        assert!(!scorer.is_suspicious("cryptoking123"));
    }

    #[test]
    fn test_blank_only_policy_from_json_is_config_error() {
        let policies: KeywordPolicies = serde_json::from_str(r#"{"blank": ["", "   "]}"#).unwrap();
        assert!(matches!(policies.scorer("blank"), Err(Error::Config(_))));
    }

    #[test]
    fn test_scorer_new_drops_blank_and_padded_keywords() {
        let scorer = SuspicionScorer::new("manual", keywords(&["", " ADMIN "]));
        assert_eq!(scorer.keywords(), &keywords(&["admin"]));
        assert!(!scorer.is_suspicious("cryptoking123"));
        assert!(scorer.is_suspicious("bot_admin99"));
    }

    #[test]
    fn test_policies_serialize_as_plain_map() {
        let json = serde_json::to_string(&KeywordPolicies::builtin()).unwrap();
        assert!(json.starts_with("{\"default\":["));
    }
}
