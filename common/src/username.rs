//! ユーザー名抽出
//!
//! スクリーンショットのレイアウトに応じて2つの抽出方式を切り替える:
//! - AnchoredMulti: 行内の全トークンから `@xxxxx` 形式を拾う（メンバー一覧など、
//!   ユーザー名が単独行または他の単語に混在するレイアウト）
//! - FirstTokenOnly: 行頭の1トークンのみを候補にし、`@` は任意（ステータス行の
//!   先頭がユーザー名になっているレイアウト）

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

lazy_static! {
    static ref ANCHORED_RE: Regex = Regex::new(r"^@[A-Za-z0-9_]{5,32}$").unwrap();
    static ref BARE_RE: Regex = Regex::new(r"^[A-Za-z0-9_]{5,32}$").unwrap();
}

/// FirstTokenOnly で候補を分割したときの最大語数
const MAX_SUB_WORDS: usize = 4;

/// ユーザー名抽出方式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionMode {
    /// 全トークン走査、`@` 必須
    #[default]
    AnchoredMulti,
    /// 行頭トークンのみ、`@` 任意
    FirstTokenOnly,
}

impl std::str::FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anchored-multi" | "anchored" | "strict" => Ok(ExtractionMode::AnchoredMulti),
            "first-token-only" | "first-token" | "loose" => Ok(ExtractionMode::FirstTokenOnly),
            _ => Err(format!(
                "Unknown extraction mode: {}. Use anchored-multi or first-token-only",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionMode::AnchoredMulti => write!(f, "anchored-multi"),
            ExtractionMode::FirstTokenOnly => write!(f, "first-token-only"),
        }
    }
}

/// 1行からユーザー名を抽出（`@` は除去して返す）
///
/// ノイズ判定は呼び出し側で行う
pub fn extract_usernames(line: &str, mode: ExtractionMode) -> BTreeSet<String> {
    match mode {
        ExtractionMode::AnchoredMulti => extract_anchored(line),
        ExtractionMode::FirstTokenOnly => extract_first_token(line).into_iter().collect(),
    }
}

fn extract_anchored(line: &str) -> BTreeSet<String> {
    line.split_whitespace()
        .filter(|word| ANCHORED_RE.is_match(word))
        .map(|word| word[1..].to_string())
        .collect()
}

fn extract_first_token(line: &str) -> Option<String> {
    let first = line.split_whitespace().next()?;
    let candidate = first.strip_prefix('@').unwrap_or(first);

    if !BARE_RE.is_match(candidate) {
        return None;
    }
    // 空白で既に分割済みなので常に1語だが、挙動互換のため残す
    if candidate.split_whitespace().count() > MAX_SUB_WORDS {
        return None;
    }

    Some(candidate.to_string())
}
