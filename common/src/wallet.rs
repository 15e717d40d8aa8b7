//! ウォレット抽出
//!
//! - 断片: `r` + 英数字8文字（トークン境界を問わず行内のどこでも一致）
//! - 完全アドレス: `r` + base58文字（`0OIl` を除く）24〜34文字、行全体で一致
//!
//! チェックサム検証は行わない（形状のみ）

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

lazy_static! {
    static ref FRAGMENT_RE: Regex = Regex::new(r"r[A-Za-z0-9]{8}").unwrap();
    static ref FRAGMENT_EXACT_RE: Regex = Regex::new(r"^r[A-Za-z0-9]{8}$").unwrap();
    static ref FULL_WALLET_RE: Regex = Regex::new(r"^r[1-9A-HJ-NP-Za-km-z]{24,34}$").unwrap();
}

/// 行内の全ウォレット断片を抽出（重複しない一致をすべて返す）
pub fn extract_wallet_fragments(line: &str) -> BTreeSet<String> {
    FRAGMENT_RE
        .find_iter(line)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// 複数行テキストから完全アドレスを抽出（1行1候補、トリム後に行全体で一致）
pub fn extract_full_wallets(text: &str) -> BTreeSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| is_full_wallet(line))
        .map(str::to_string)
        .collect()
}

/// 手入力テキストを完全アドレスの集合に変換
///
/// 空行・不正な行は黙って捨てる（貼り付け欄の入力を想定）
pub fn parse_manual_wallets(text: &str) -> BTreeSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| is_full_wallet(line))
        .map(str::to_string)
        .collect()
}

/// OCR行の各トークンから完全アドレスを抽出
pub fn extract_full_wallet_tokens(line: &str) -> BTreeSet<String> {
    line.split_whitespace()
        .filter(|token| is_full_wallet(token))
        .map(str::to_string)
        .collect()
}

/// 完全アドレスの形状か
pub fn is_full_wallet(s: &str) -> bool {
    FULL_WALLET_RE.is_match(s)
}

/// ちょうど9文字の断片の形状か
pub fn is_wallet_fragment(s: &str) -> bool {
    FRAGMENT_EXACT_RE.is_match(s)
}
