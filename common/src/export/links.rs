//! ディープリンク生成
//!
//! ユーザー名はTelegram、完全アドレスはXRPScanへリンクする。
//! 断片はアドレスを特定できないためリンクなし。

use crate::types::WalletKind;

const TELEGRAM_BASE: &str = "https://t.me";
const EXPLORER_BASE: &str = "https://xrpscan.com/account";

/// `https://t.me/{username}`
pub fn telegram_link(username: &str) -> String {
    format!("{}/{}", TELEGRAM_BASE, username.trim_start_matches('@'))
}

/// 完全アドレスのみ `https://xrpscan.com/account/{address}`
pub fn explorer_link(wallet: &str) -> Option<String> {
    match WalletKind::of(wallet) {
        Some(WalletKind::Full) => Some(format!("{}/{}", EXPLORER_BASE, wallet)),
        _ => None,
    }
}
