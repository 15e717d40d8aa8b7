use crate::ocr::OcrFailure;
use tg_overlap_common::{Extractor, IdentifierSet};

/// 画像1枚分の処理結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageOutcome {
    pub file_name: String,
    pub identifiers: IdentifierSet,
    /// OCR失敗時のメッセージ（このとき identifiers は空）
    pub error: Option<String>,
}

impl ImageOutcome {
    pub fn from_text(file_name: &str, text: &str, extractor: &Extractor) -> Self {
        Self {
            file_name: file_name.to_string(),
            identifiers: extractor.extract(text),
            error: None,
        }
    }

    pub fn failed(file_name: &str, failure: &OcrFailure) -> Self {
        Self {
            file_name: file_name.to_string(),
            identifiers: IdentifierSet::default(),
            error: Some(failure.to_string()),
        }
    }
}
