use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tg_overlap_common::ExtractionMode;

#[derive(Parser)]
#[command(name = "tg-overlap")]
#[command(about = "Telegramスクリーンショットのユーザー名・ウォレット重複検出ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 2グループのスクリーンショットを照合
    Compare {
        /// グループA（Coin A）のスクリーンショットフォルダ
        #[arg(required = true)]
        group_a: PathBuf,

        /// グループB（Coin B）のスクリーンショットフォルダ
        #[arg(required = true)]
        group_b: PathBuf,

        /// 手入力ウォレット（1行1アドレス、グループBに追加）
        #[arg(long)]
        manual_wallets: Option<PathBuf>,

        /// ユーザー名抽出方式 (anchored-multi/first-token-only)
        #[arg(short, long)]
        mode: Option<ExtractionMode>,

        /// キーワードポリシー名
        #[arg(short, long)]
        policy: Option<String>,

        /// OCRテキストから完全アドレスも抽出
        #[arg(long)]
        full_wallets: bool,

        /// 出力ディレクトリ（省略時はエクスポートしない）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (csv/json/excel/all)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// 同時OCR数
        #[arg(short, long)]
        jobs: Option<usize>,

        /// キャッシュを使用（再OCRをスキップ）
        #[arg(long)]
        use_cache: bool,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// 1フォルダのスクリーンショットから識別子を抽出
    Extract {
        /// スクリーンショットフォルダ
        #[arg(required = true)]
        folder: PathBuf,

        /// ユーザー名抽出方式 (anchored-multi/first-token-only)
        #[arg(short, long)]
        mode: Option<ExtractionMode>,

        /// OCRテキストから完全アドレスも抽出
        #[arg(long)]
        full_wallets: bool,

        /// 同時OCR数
        #[arg(short, long)]
        jobs: Option<usize>,

        /// キャッシュを使用（再OCRをスキップ）
        #[arg(long)]
        use_cache: bool,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 既定の抽出方式を設定
        #[arg(long)]
        set_mode: Option<ExtractionMode>,

        /// 既定のキーワードポリシーを設定
        #[arg(long)]
        set_policy: Option<String>,

        /// tesseractの実行パスを設定
        #[arg(long)]
        set_tesseract: Option<String>,

        /// OCR言語を設定（例: eng+nld）
        #[arg(long)]
        set_languages: Option<String>,
    },

    /// OCRキャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// 対象フォルダ（省略時はカレント）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Excel,
    All,
}

impl ExportFormat {
    pub fn includes_csv(&self) -> bool {
        matches!(self, ExportFormat::Csv | ExportFormat::All)
    }

    pub fn includes_json(&self) -> bool {
        matches!(self, ExportFormat::Json | ExportFormat::All)
    }

    pub fn includes_excel(&self) -> bool {
        matches!(self, ExportFormat::Excel | ExportFormat::All)
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" | "txt" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "all" => Ok(ExportFormat::All),
            _ => Err(format!("Unknown format: {}. Use csv, json, excel, or all", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("xlsx".parse::<ExportFormat>(), Ok(ExportFormat::Excel));
        assert_eq!("all".parse::<ExportFormat>(), Ok(ExportFormat::All));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_format_includes() {
        assert!(ExportFormat::All.includes_csv());
        assert!(ExportFormat::All.includes_json());
        assert!(ExportFormat::All.includes_excel());
        assert!(!ExportFormat::Csv.includes_excel());
    }

    #[test]
    fn test_parse_compare_command() {
        let cli = Cli::try_parse_from([
            "tg-overlap", "compare", "coin_a", "coin_b",
            "--mode", "first-token-only", "--policy", "shill", "-j", "4",
        ])
        .unwrap();

        match cli.command {
            Commands::Compare { group_a, mode, policy, jobs, format, .. } => {
                assert_eq!(group_a, PathBuf::from("coin_a"));
                assert_eq!(mode, Some(ExtractionMode::FirstTokenOnly));
                assert_eq!(policy.as_deref(), Some("shill"));
                assert_eq!(jobs, Some(4));
                assert_eq!(format, ExportFormat::Csv);
            }
            _ => panic!("compare として解析されていない"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        let result = Cli::try_parse_from(["tg-overlap", "extract", "folder", "--mode", "fuzzy"]);
        assert!(result.is_err());
    }
}
