//! 改行区切りテキスト出力
//!
//! 1行1識別子、ヘッダなし、エスケープなし（文字種に区切り文字が含まれないため）。
//! ユーザー名は `@` を付け直して出力する。

use std::collections::BTreeSet;

/// `@user` を改行で連結（末尾改行なし）
pub fn usernames_to_lines<'a, I>(usernames: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    usernames
        .into_iter()
        .map(|u| format!("@{}", u))
        .collect::<Vec<_>>()
        .join("\n")
}

/// ウォレットを改行で連結（末尾改行なし）
pub fn wallets_to_lines(wallets: &BTreeSet<String>) -> String {
    wallets.iter().map(String::as_str).collect::<Vec<_>>().join("\n")
}
