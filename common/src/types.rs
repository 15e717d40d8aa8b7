//! 抽出結果の型定義
//!
//! CLIとテストで共有される型:
//! - IdentifierSet: 1グループ（または1画像）から抽出した識別子
//! - OverlapResult: 2グループの共通部分
//! - WalletKind: ウォレット文字列の種別（断片 / 完全アドレス）

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::wallet::{is_full_wallet, is_wallet_fragment};

/// 抽出された識別子の集合
///
/// ユーザー名は先頭の `@` を除いた形で保持する。
/// BTreeSetなので表示順は常に辞書順になる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentifierSet {
    pub usernames: BTreeSet<String>,
    pub wallet_fragments: BTreeSet<String>,
    pub full_wallets: BTreeSet<String>,
}

impl IdentifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 別の集合を和集合として取り込む
    pub fn merge(&mut self, other: IdentifierSet) {
        self.usernames.extend(other.usernames);
        self.wallet_fragments.extend(other.wallet_fragments);
        self.full_wallets.extend(other.full_wallets);
    }

    /// 手入力ウォレットを取り込む（グループBのみ）
    pub fn merge_manual_wallets(&mut self, manual: &BTreeSet<String>) {
        self.full_wallets.extend(manual.iter().cloned());
    }

    /// 断片 ∪ 完全アドレス
    pub fn wallets(&self) -> BTreeSet<String> {
        self.wallet_fragments
            .union(&self.full_wallets)
            .cloned()
            .collect()
    }

    pub fn username_count(&self) -> usize {
        self.usernames.len()
    }

    pub fn wallet_count(&self) -> usize {
        self.wallets().len()
    }

    pub fn is_empty(&self) -> bool {
        self.usernames.is_empty() && self.wallet_fragments.is_empty() && self.full_wallets.is_empty()
    }
}

/// 2グループの共通部分
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapResult {
    pub usernames: BTreeSet<String>,
    pub wallets: BTreeSet<String>,
}

impl OverlapResult {
    pub fn is_empty(&self) -> bool {
        self.usernames.is_empty() && self.wallets.is_empty()
    }
}

/// ウォレット文字列の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WalletKind {
    /// 9文字の断片（リンクなし）
    Fragment,
    /// 完全アドレス（エクスプローラへリンク可能）
    Full,
}

impl WalletKind {
    /// 形状から種別を判定。どちらにも当てはまらない場合はNone
    pub fn of(wallet: &str) -> Option<Self> {
        if is_full_wallet(wallet) {
            Some(WalletKind::Full)
        } else if is_wallet_fragment(wallet) {
            Some(WalletKind::Fragment)
        } else {
            None
        }
    }
}

impl std::fmt::Display for WalletKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletKind::Fragment => write!(f, "fragment"),
            WalletKind::Full => write!(f, "full"),
        }
    }
}
