//! グループ間の照合
//!
//! 2グループの識別子集合の共通部分を求める純粋関数と、
//! 入力の有無に応じた照合実行ルール。

use crate::suspicion::SuspicionScorer;
use crate::types::{IdentifierSet, OverlapResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// ユーザー名・ウォレットそれぞれの共通部分
///
/// 副作用なし。挿入順に依存しない。
pub fn reconcile(a: &IdentifierSet, b: &IdentifierSet) -> OverlapResult {
    OverlapResult {
        usernames: a.usernames.intersection(&b.usernames).cloned().collect(),
        wallets: a.wallets().intersection(&b.wallets()).cloned().collect(),
    }
}

/// 1グループ分の抽出結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupExtraction {
    /// 処理した画像数（OCR失敗を含む）
    pub image_count: usize,
    pub identifiers: IdentifierSet,
    /// OCR失敗の診断（ファイル名, メッセージ）
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl GroupExtraction {
    pub fn has_images(&self) -> bool {
        self.image_count > 0
    }
}

/// 画像単位の診断情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub file_name: String,
    pub message: String,
}

/// 共通ユーザー名と疑わしさフラグ
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlaggedUsername {
    pub username: String,
    pub suspicious: bool,
}

/// 照合結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub username_count_a: usize,
    pub username_count_b: usize,
    pub wallet_count_a: usize,
    pub wallet_count_b: usize,
    /// 両グループに画像がある場合のみSome
    pub username_overlap: Option<Vec<FlaggedUsername>>,
    /// 両グループに画像がある、または手入力ウォレットがある場合のみSome
    pub wallet_overlap: Option<BTreeSet<String>>,
    /// 手入力ウォレットを取り込んだ後のグループB
    pub group_b: IdentifierSet,
}

impl Analysis {
    pub fn suspicious_count(&self) -> usize {
        self.username_overlap
            .as_ref()
            .map(|users| users.iter().filter(|u| u.suspicious).count())
            .unwrap_or(0)
    }
}

/// 照合の実行結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// 入力がない（アップロードを促す）
    AwaitingInput,
    Completed(Analysis),
}

/// 入力状況に応じて照合を実行する
///
/// - 両グループに画像がなく手入力もない → AwaitingInput
/// - ユーザー名の照合は両グループに画像がある場合のみ
/// - ウォレットの照合は両グループに画像がある、または手入力がある場合
/// - 手入力ウォレットはグループBにのみ取り込む
pub fn analyze(
    a: &GroupExtraction,
    b: &GroupExtraction,
    manual_wallets: &BTreeSet<String>,
    scorer: &SuspicionScorer,
) -> AnalysisOutcome {
    let both_groups = a.has_images() && b.has_images();
    let has_manual = !manual_wallets.is_empty();

    if !both_groups && !has_manual {
        return AnalysisOutcome::AwaitingInput;
    }

    let mut group_b = b.identifiers.clone();
    group_b.merge_manual_wallets(manual_wallets);

    let overlap = reconcile(&a.identifiers, &group_b);

    let username_overlap = both_groups.then(|| {
        overlap
            .usernames
            .iter()
            .map(|username| FlaggedUsername {
                username: username.clone(),
                suspicious: scorer.is_suspicious(username),
            })
            .collect()
    });

    AnalysisOutcome::Completed(Analysis {
        username_count_a: a.identifiers.username_count(),
        username_count_b: group_b.username_count(),
        wallet_count_a: a.identifiers.wallet_count(),
        wallet_count_b: group_b.wallet_count(),
        username_overlap,
        wallet_overlap: Some(overlap.wallets),
        group_b,
    })
}
