//! OCRエンジン
//!
//! OCR自体は外部ツール（tesseract）に任せる。失敗は画像単位の値として返し、
//! バッチ全体を止めない。

mod preprocess;
mod tesseract;

pub use preprocess::{prepare_image, PreparedImage, PreprocessOptions};
pub use tesseract::TesseractEngine;

use std::path::Path;
use thiserror::Error;

/// 画像1枚分のOCR失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OcrFailure {
    #[error("画像デコードエラー: {0}")]
    Decode(String),

    #[error("前処理エラー: {0}")]
    Preprocess(String),

    #[error("tesseract起動エラー: {0}")]
    Spawn(String),

    #[error("tesseract失敗 (code {code:?}): {stderr}")]
    Exit { code: Option<i32>, stderr: String },

    #[error("OCR出力がUTF-8ではありません")]
    Encoding,

    #[error("OCRワーカーが異常終了: {0}")]
    Worker(String),
}

pub type OcrResult = std::result::Result<String, OcrFailure>;

/// 画像 → テキスト
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &Path) -> OcrResult;
}
