//! tesseract CLI連携
//!
//! `tesseract <image> stdout -l <langs>` をサブプロセスで実行し、標準出力をOCRテキストとする

use super::preprocess::{prepare_image, PreprocessOptions};
use super::{OcrEngine, OcrFailure, OcrResult};
use crate::config::Config;
use std::path::Path;
use std::process::Command;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: String,
    languages: String,
    preprocess: PreprocessOptions,
}

impl TesseractEngine {
    pub fn new(binary: &str, languages: &str, preprocess: PreprocessOptions) -> Self {
        Self {
            binary: binary.to_string(),
            languages: languages.to_string(),
            preprocess,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.tesseract_path,
            &config.ocr_languages,
            PreprocessOptions {
                grayscale: config.grayscale,
                min_width: config.min_width,
            },
        )
    }

    /// `tesseract --version` で実行可能か確認
    pub fn version(&self) -> OcrResult {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .map_err(|e| OcrFailure::Spawn(format!("{}: {}", self.binary, e)))?;

        if !output.status.success() {
            return Err(OcrFailure::Exit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // 古いtesseractはバージョンをstderrに出す
        let text = if output.stdout.is_empty() { &output.stderr } else { &output.stdout };
        let version = String::from_utf8_lossy(text);
        Ok(version.lines().next().unwrap_or_default().trim().to_string())
    }

    fn run(&self, image: &Path) -> OcrResult {
        let mut command = Command::new(&self.binary);
        command.arg(image).arg("stdout");
        if !self.languages.is_empty() {
            command.args(["-l", &self.languages]);
        }

        let output = command
            .output()
            .map_err(|e| OcrFailure::Spawn(format!("{}: {}", self.binary, e)))?;

        if !output.status.success() {
            return Err(OcrFailure::Exit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| OcrFailure::Encoding)
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &Path) -> OcrResult {
        let prepared = prepare_image(image, &self.preprocess)?;
        let text = self.run(prepared.path())?;
        debug!(image = %image.display(), chars = text.len(), "OCR完了");
        Ok(text)
    }
}
