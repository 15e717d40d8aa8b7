//! 照合の一連の処理（スキャン → OCR・抽出 → 照合 → レポート）

use crate::analyzer::{self, BatchOptions};
use crate::error::Result;
use crate::ocr::OcrEngine;
use crate::report::{Report, ReportInput};
use crate::scanner;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use tg_overlap_common::{analyze, AnalysisOutcome, Extractor, GroupExtraction, SuspicionScorer};
use tracing::info;

/// 1回の照合に必要な設定
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub extractor: Extractor,
    pub scorer: SuspicionScorer,
    pub batch: BatchOptions,
    pub recursive: bool,
}

#[derive(Debug)]
pub enum CompareOutcome {
    /// 入力がない
    AwaitingInput,
    Completed(Box<Report>),
}

/// 1フォルダをスキャンしてOCR・抽出
pub async fn extract_folder(
    folder: &Path,
    engine: Arc<dyn OcrEngine>,
    settings: &RunSettings,
) -> Result<GroupExtraction> {
    let images = scanner::scan_folder(folder, settings.recursive)?;
    info!(folder = %folder.display(), images = images.len(), "スキャン完了");

    analyzer::process_group(folder, &images, engine, settings.extractor, &settings.batch).await
}

pub async fn compare(
    group_a: &Path,
    group_b: &Path,
    manual_wallets: &BTreeSet<String>,
    engine: Arc<dyn OcrEngine>,
    settings: &RunSettings,
) -> Result<CompareOutcome> {
    println!("[1/3] スクリーンショットをスキャン中...");
    // フォルダの存在確認を先に済ませる（OCR後に失敗しないように）
    let images_a = scanner::scan_folder(group_a, settings.recursive)?;
    let images_b = scanner::scan_folder(group_b, settings.recursive)?;
    println!("✔ グループA: {}枚 / グループB: {}枚", images_a.len(), images_b.len());
    if !manual_wallets.is_empty() {
        println!("✔ 手入力ウォレット: {}件", manual_wallets.len());
    }

    if images_a.is_empty() && images_b.is_empty() && manual_wallets.is_empty() {
        return Ok(CompareOutcome::AwaitingInput);
    }

    println!("\n[2/3] OCR・抽出中...");
    println!("- グループA");
    let extraction_a = analyzer::process_group(
        group_a,
        &images_a,
        Arc::clone(&engine),
        settings.extractor,
        &settings.batch,
    )
    .await?;
    println!("- グループB");
    let extraction_b = analyzer::process_group(
        group_b,
        &images_b,
        engine,
        settings.extractor,
        &settings.batch,
    )
    .await?;

    println!("\n[3/3] 照合中...");
    let analysis = match analyze(&extraction_a, &extraction_b, manual_wallets, &settings.scorer) {
        AnalysisOutcome::AwaitingInput => return Ok(CompareOutcome::AwaitingInput),
        AnalysisOutcome::Completed(analysis) => analysis,
    };

    let report = Report::build(ReportInput {
        analysis: &analysis,
        group_a: &extraction_a,
        group_b: &extraction_b,
        source_a: &group_a.display().to_string(),
        source_b: &group_b.display().to_string(),
        extraction_mode: settings.extractor.config().mode,
        keyword_policy: settings.scorer.policy(),
    });

    Ok(CompareOutcome::Completed(Box::new(report)))
}
