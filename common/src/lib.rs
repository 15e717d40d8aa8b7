//! Telegram Overlap Common Library
//!
//! OCRテキストからユーザー名・ウォレットを抽出し、2グループ間の重複を求めるコア。
//! ファイルI/Oや環境変数へのアクセスは行わない（設定は呼び出し側から渡す）。

pub mod classifier;
pub mod error;
pub mod export;
pub mod extractor;
pub mod reconcile;
pub mod suspicion;
pub mod types;
pub mod username;
pub mod wallet;

pub use classifier::is_noise_line;
pub use error::{Error, Result};
pub use export::{explorer_link, telegram_link, usernames_to_lines, wallets_to_lines};
pub use extractor::{Extractor, ExtractorConfig};
pub use reconcile::{
    analyze, reconcile, Analysis, AnalysisOutcome, Diagnostic, FlaggedUsername, GroupExtraction,
};
pub use suspicion::{is_suspicious, KeywordPolicies, SuspicionScorer};
pub use types::{IdentifierSet, OverlapResult, WalletKind};
pub use username::{extract_usernames, ExtractionMode};
pub use wallet::{
    extract_full_wallets, extract_wallet_fragments, is_full_wallet, is_wallet_fragment,
    parse_manual_wallets,
};
