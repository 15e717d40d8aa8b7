use crate::ocr::OcrFailure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlapError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("キーワードポリシーが見つかりません: {0}（`tg-overlap config --show` で一覧を確認してください）")]
    UnknownPolicy(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("OCRエンジンを利用できません: {0}")]
    OcrUnavailable(#[source] OcrFailure),

    #[error("OCRワーカーエラー: {0}")]
    Worker(String),

    #[error("Excel生成エラー: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(tg_overlap_common::Error),
}

impl From<tg_overlap_common::Error> for OverlapError {
    fn from(err: tg_overlap_common::Error) -> Self {
        match err {
            tg_overlap_common::Error::UnknownPolicy(name) => OverlapError::UnknownPolicy(name),
            other => OverlapError::Common(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, OverlapError>;
