pub mod csv;
pub mod excel;

use crate::cli::ExportFormat;
use crate::error::Result;
use crate::report::Report;
use std::path::{Path, PathBuf};

const JSON_FILE_NAME: &str = "report.json";
const EXCEL_FILE_NAME: &str = "report.xlsx";

pub fn write_json(report: &Report, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(JSON_FILE_NAME);
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

/// 指定形式でレポートを書き出し、作成したファイルを返す
pub fn export_report(report: &Report, format: &ExportFormat, output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();

    if format.includes_csv() {
        println!("- CSVを出力中...");
        written.extend(csv::write_csv_files(report, output_dir)?);
    }
    if format.includes_json() {
        println!("- JSONを出力中...");
        written.push(write_json(report, output_dir)?);
    }
    if format.includes_excel() {
        println!("- Excelを生成中...");
        let path = output_dir.join(EXCEL_FILE_NAME);
        excel::generate_excel(report, &path)?;
        written.push(path);
    }

    for path in &written {
        println!("✔ 出力: {}", path.display());
    }

    Ok(written)
}
