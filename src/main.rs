use clap::Parser;
use std::collections::BTreeSet;
use std::sync::Arc;
use tg_overlap::{analyzer, cli, config, error, export, logging, ocr, pipeline, render};
use tg_overlap_common::parse_manual_wallets;
use cli::{Cli, Commands};
use config::Config;
use error::{OverlapError, Result};
use ocr::{OcrEngine, TesseractEngine};
use pipeline::{CompareOutcome, RunSettings};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::configure_logging(cli.verbose);

    // configコマンドは壊れた設定の修正にも使うため検証しない
    let config = match cli.command {
        Commands::Config { .. } => Config::load_unchecked()?,
        _ => Config::load()?,
    };

    match cli.command {
        Commands::Compare {
            group_a, group_b, manual_wallets, mode, policy, full_wallets,
            output, format, jobs, use_cache, recursive,
        } => {
            println!("🔁 tg-overlap - 重複検出\n");

            let manual = match manual_wallets {
                Some(path) => {
                    if !path.exists() {
                        return Err(OverlapError::FileNotFound(path.display().to_string()));
                    }
                    parse_manual_wallets(&std::fs::read_to_string(&path)?)
                }
                None => BTreeSet::new(),
            };

            let settings = RunSettings {
                extractor: tg_overlap_common::Extractor::new(config.extractor_config(mode, full_wallets)),
                scorer: config.scorer(policy.as_deref())?,
                batch: analyzer::BatchOptions {
                    jobs: jobs.unwrap_or(config.jobs).max(1),
                    use_cache,
                    show_progress: true,
                },
                recursive,
            };

            let engine = tesseract_engine(&config)?;
            let outcome = pipeline::compare(&group_a, &group_b, &manual, engine, &settings).await?;

            let report = match outcome {
                CompareOutcome::AwaitingInput => {
                    render::print_awaiting_input();
                    return Ok(());
                }
                CompareOutcome::Completed(report) => report,
            };

            render::print_report(&report);

            if let Some(output_dir) = output {
                println!("\n📥 エクスポート中...");
                export::export_report(&report, &format, &output_dir)?;
            }

            println!("\n✅ 完了");
        }

        Commands::Extract { folder, mode, full_wallets, jobs, use_cache, recursive } => {
            println!("🔍 tg-overlap - 抽出\n");

            let settings = RunSettings {
                extractor: tg_overlap_common::Extractor::new(config.extractor_config(mode, full_wallets)),
                scorer: config.scorer(None)?,
                batch: analyzer::BatchOptions {
                    jobs: jobs.unwrap_or(config.jobs).max(1),
                    use_cache,
                    show_progress: true,
                },
                recursive,
            };

            let engine = tesseract_engine(&config)?;
            let group = pipeline::extract_folder(&folder, engine, &settings).await?;
            println!("✔ {}枚の画像を処理", group.image_count);

            render::print_extraction(&group);
        }

        Commands::Config { show, set_mode, set_policy, set_tesseract, set_languages } => {
            let mut config = config;
            let mut changed = false;

            if let Some(mode) = set_mode {
                config.set_mode(mode);
                println!("✔ 抽出方式を設定しました: {}", mode);
                changed = true;
            }
            if let Some(policy) = set_policy {
                config.set_policy(&policy)?;
                println!("✔ キーワードポリシーを設定しました: {}", policy);
                changed = true;
            }
            if let Some(path) = set_tesseract {
                config.tesseract_path = path;
                println!("✔ tesseractのパスを設定しました");
                changed = true;
            }
            if let Some(languages) = set_languages {
                config.ocr_languages = languages;
                println!("✔ OCR言語を設定しました");
                changed = true;
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定: {}", Config::config_path()?.display());
                println!("  抽出方式: {}", config.extraction_mode);
                println!("  完全アドレス抽出: {}", if config.scan_full_wallets { "有効" } else { "無効" });
                println!("  キーワードポリシー: {}", config.active_policy);
                for name in config.keyword_policies.names() {
                    let keywords = config
                        .keyword_policies
                        .get(name)
                        .map(|k| k.iter().cloned().collect::<Vec<_>>().join(", "))
                        .unwrap_or_default();
                    println!("    - {}: {}", name, keywords);
                }
                println!("  tesseract: {} (-l {})", config.tesseract_path, config.ocr_languages);
                println!("  同時OCR数: {}", config.jobs);
                println!("  前処理: グレースケール={} / 最小幅={}px", config.grayscale, config.min_width);
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.unwrap_or_else(|| std::path::PathBuf::from("."));
            let cache_path = analyzer::CacheFile::cache_path(&target);

            if info || !clear {
                if cache_path.exists() {
                    let cache = analyzer::CacheFile::load(&target);
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  件数: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                } else {
                    println!("キャッシュファイルが存在しません: {}", cache_path.display());
                }
            }

            if clear {
                match analyzer::CacheFile::clear(&target) {
                    Ok(true) => println!("✔ キャッシュを削除しました: {}", cache_path.display()),
                    Ok(false) => println!("キャッシュファイルが存在しません"),
                    Err(e) => println!("キャッシュ削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// tesseractが起動できることを確認してからエンジンを返す
fn tesseract_engine(config: &Config) -> Result<Arc<dyn OcrEngine>> {
    let engine = TesseractEngine::from_config(config);
    let version = engine.version().map_err(OverlapError::OcrUnavailable)?;
    tracing::debug!(%version, "tesseract検出");
    Ok(Arc::new(engine))
}
