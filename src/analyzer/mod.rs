//! グループ単位のOCR・抽出処理
//!
//! 1. キャッシュ照会（--use-cache時）
//! 2. 未キャッシュ画像をブロッキングワーカーでOCR（同時実行数は jobs で制限）
//! 3. 画像ごとに抽出し、和集合でグループの集合にまとめる
//!
//! OCR失敗は画像単位の診断として記録し、残りの画像の処理は続ける。

pub mod cache;
mod types;

pub use cache::CacheFile;
pub use types::ImageOutcome;

use crate::error::{OverlapError, Result};
use crate::ocr::{OcrEngine, OcrFailure};
use crate::scanner::ImageInfo;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use tg_overlap_common::{Diagnostic, Extractor, GroupExtraction};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// 同時OCR数（1で逐次処理）
    pub jobs: usize,
    pub use_cache: bool,
    pub show_progress: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            use_cache: false,
            show_progress: true,
        }
    }
}

/// 1グループ分の画像をOCRして抽出する
pub async fn process_group(
    folder: &Path,
    images: &[ImageInfo],
    engine: Arc<dyn OcrEngine>,
    extractor: Extractor,
    options: &BatchOptions,
) -> Result<GroupExtraction> {
    let progress = progress_bar(images.len() as u64, options.show_progress);

    let mut cache = if options.use_cache {
        CacheFile::load(folder)
    } else {
        CacheFile::default()
    };

    let (cached, pending) = if options.use_cache {
        cache::partition_cached(images, &cache)
    } else {
        (Vec::new(), images.iter().cloned().map(|img| (img, String::new())).collect())
    };

    if options.use_cache {
        debug!(cached = cached.len(), pending = pending.len(), "キャッシュ照会");
    }

    let mut outcomes = Vec::with_capacity(images.len());
    for (image, text) in cached {
        outcomes.push(ImageOutcome::from_text(&image.file_name, &text, &extractor));
        progress.inc(1);
    }

    let semaphore = Arc::new(Semaphore::new(options.jobs.max(1)));
    let mut handles = Vec::with_capacity(pending.len());

    for (image, hash) in pending {
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| OverlapError::Worker(e.to_string()))?;
        let engine = Arc::clone(&engine);
        let path = image.path.clone();
        let progress = progress.clone();

        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let result = engine.recognize(&path);
            progress.inc(1);
            result
        });
        handles.push((image, hash, handle));
    }

    let mut cache_updated = false;
    for (image, hash, handle) in handles {
        let result = handle
            .await
            .unwrap_or_else(|e| Err(OcrFailure::Worker(e.to_string())));

        match result {
            Ok(text) => {
                outcomes.push(ImageOutcome::from_text(&image.file_name, &text, &extractor));
                if options.use_cache && !hash.is_empty() {
                    let file_size = std::fs::metadata(&image.path).map(|m| m.len()).unwrap_or(0);
                    cache.insert(hash, image.file_name.clone(), file_size, text);
                    cache_updated = true;
                }
            }
            Err(failure) => {
                warn!(image = %image.file_name, error = %failure, "OCR失敗");
                outcomes.push(ImageOutcome::failed(&image.file_name, &failure));
            }
        }
    }

    progress.finish_and_clear();

    if cache_updated {
        if let Err(e) = cache.save(folder) {
            warn!(folder = %folder.display(), error = %e, "キャッシュ保存に失敗");
        }
    }

    Ok(fold_outcomes(outcomes))
}

/// 画像ごとの結果をグループの抽出結果にまとめる
///
/// 集合の和を取るだけなので処理順に依存しない
pub fn fold_outcomes(outcomes: Vec<ImageOutcome>) -> GroupExtraction {
    let mut group = GroupExtraction {
        image_count: outcomes.len(),
        ..Default::default()
    };

    for outcome in outcomes {
        if let Some(message) = outcome.error {
            group.diagnostics.push(Diagnostic {
                file_name: outcome.file_name,
                message,
            });
        }
        group.identifiers.merge(outcome.identifiers);
    }

    group.diagnostics.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    group
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("  [{bar:30}] {pos}/{len} {msg}") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}
