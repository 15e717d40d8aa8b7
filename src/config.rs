use crate::error::{OverlapError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tg_overlap_common::{ExtractionMode, ExtractorConfig, KeywordPolicies, SuspicionScorer};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub extraction_mode: ExtractionMode,
    pub scan_full_wallets: bool,
    pub active_policy: String,
    pub keyword_policies: KeywordPolicies,
    pub tesseract_path: String,
    pub ocr_languages: String,
    pub jobs: usize,
    pub grayscale: bool,
    pub min_width: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extraction_mode: ExtractionMode::AnchoredMulti,
            scan_full_wallets: false,
            active_policy: "default".into(),
            keyword_policies: KeywordPolicies::builtin(),
            tesseract_path: "tesseract".into(),
            ocr_languages: "eng".into(),
            jobs: 1,
            grayscale: true,
            min_width: 1000, // 小さいスクリーンショットはtesseractの認識率が落ちる
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 設定ファイルを読み込む（ファイルがなければデフォルト）
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Self::load_unchecked_from(path)?;
        config.validate()?;
        Ok(config)
    }

    /// 検証なしで読み込む（`config` コマンドで壊れた設定を修正するため）
    pub fn load_unchecked() -> Result<Self> {
        Self::load_unchecked_from(&Self::config_path()?)
    }

    pub fn load_unchecked_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| OverlapError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| OverlapError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("tg-overlap").join("config.json"))
    }

    /// 起動時チェック: 有効なポリシーが存在し、キーワードが空でないこと
    pub fn validate(&self) -> Result<()> {
        if self.jobs == 0 {
            return Err(OverlapError::Config("jobs は1以上を指定してください".into()));
        }
        self.keyword_policies.scorer(&self.active_policy)?;
        Ok(())
    }

    pub fn extractor_config(&self, mode: Option<ExtractionMode>, scan_full_wallets: bool) -> ExtractorConfig {
        ExtractorConfig {
            mode: mode.unwrap_or(self.extraction_mode),
            scan_full_wallets: scan_full_wallets || self.scan_full_wallets,
        }
    }

    pub fn scorer(&self, policy: Option<&str>) -> Result<SuspicionScorer> {
        let name = policy.unwrap_or(&self.active_policy);
        Ok(self.keyword_policies.scorer(name)?)
    }

    pub fn set_mode(&mut self, mode: ExtractionMode) {
        self.extraction_mode = mode;
    }

    pub fn set_policy(&mut self, policy: &str) -> Result<()> {
        self.keyword_policies.scorer(policy)?;
        self.active_policy = policy.to_string();
        Ok(())
    }
}
