//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use tg_overlap::error::OverlapError;
use tg_overlap::ocr::OcrFailure;
use tg_overlap::scanner;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"), false);
    assert!(matches!(result, Err(OverlapError::FolderNotFound(_))));
}

/// 空のフォルダはエラーではなく空のVec
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path(), false);
    assert!(result.unwrap().is_empty());
}

/// ファイルをフォルダとして渡した場合
#[test]
fn test_scan_file_instead_of_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let file = dir.path().join("shot.png");
    std::fs::write(&file, b"x").unwrap();

    assert!(matches!(
        scanner::scan_folder(&file, false),
        Err(OverlapError::FolderNotFound(_))
    ));
}

/// OverlapErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        OverlapError::Config("テスト設定エラー".to_string()),
        OverlapError::UnknownPolicy("memecoin".to_string()),
        OverlapError::FileNotFound("wallets.txt".to_string()),
        OverlapError::FolderNotFound("/path/to/folder".to_string()),
        OverlapError::OcrUnavailable(OcrFailure::Spawn("tesseract: not found".to_string())),
        OverlapError::Worker("closed".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// UnknownPolicyのメッセージにconfigコマンドの案内が含まれる
#[test]
fn test_unknown_policy_message() {
    let display = OverlapError::UnknownPolicy("memecoin".into()).to_string();
    assert!(display.contains("memecoin"));
    assert!(display.contains("tg-overlap config"));
}

/// OCR失敗のメッセージ
#[test]
fn test_ocr_failure_display() {
    let failure = OcrFailure::Exit { code: Some(1), stderr: "Error opening data file".into() };
    let display = failure.to_string();
    assert!(display.contains("Some(1)"));
    assert!(display.contains("Error opening data file"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: OverlapError = io_err.into();
    assert!(matches!(err, OverlapError::Io(_)));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: OverlapError = json_err.into();
    assert!(matches!(err, OverlapError::JsonParse(_)));
}

/// common::Errorからの変換（ポリシー不明は専用バリアントへ）
#[test]
fn test_common_error_conversion() {
    let err: OverlapError = tg_overlap_common::Error::UnknownPolicy("x".into()).into();
    assert!(matches!(err, OverlapError::UnknownPolicy(_)));

    let err: OverlapError = tg_overlap_common::Error::Config("空のポリシー".into()).into();
    assert!(matches!(err, OverlapError::Common(_)));
    // 透過的エラーなのでメッセージがそのまま表示される
    assert!(err.to_string().contains("空のポリシー"));
}
