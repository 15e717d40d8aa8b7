//! OCR前処理
//!
//! スクリーンショットをデコードし、必要ならグレースケール化・拡大して
//! 一時PNGに書き出す。変換不要ならデコード確認だけ行い元ファイルを使う。

use super::OcrFailure;
use image::imageops::FilterType;
use image::GenericImageView;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreprocessOptions {
    pub grayscale: bool,
    /// この幅未満の画像は拡大する（0で無効）
    pub min_width: u32,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            grayscale: true,
            min_width: 1000,
        }
    }
}

/// OCRに渡す画像。一時ファイルはDropで削除される
#[derive(Debug)]
pub struct PreparedImage {
    path: PathBuf,
    temporary: bool,
}

impl PreparedImage {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_temporary(&self) -> bool {
        self.temporary
    }
}

impl Drop for PreparedImage {
    fn drop(&mut self) {
        if self.temporary {
            std::fs::remove_file(&self.path).ok();
        }
    }
}

pub fn prepare_image(source: &Path, options: &PreprocessOptions) -> Result<PreparedImage, OcrFailure> {
    let img = image::open(source).map_err(|e| OcrFailure::Decode(e.to_string()))?;
    let (width, height) = img.dimensions();

    let needs_upscale = options.min_width > 0 && width > 0 && width < options.min_width;
    if !options.grayscale && !needs_upscale {
        return Ok(PreparedImage {
            path: source.to_path_buf(),
            temporary: false,
        });
    }

    let mut img = if options.grayscale { img.grayscale() } else { img };

    if needs_upscale {
        let new_height = ((height as u64 * options.min_width as u64) / width as u64).max(1) as u32;
        img = img.resize_exact(options.min_width, new_height, FilterType::Triangle);
    }

    let path = std::env::temp_dir().join(format!(
        "tg-overlap-{}-{}.png",
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    img.save(&path)
        .map_err(|e| OcrFailure::Preprocess(format!("{}: {}", path.display(), e)))?;

    Ok(PreparedImage {
        path,
        temporary: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        let err = prepare_image(&path, &PreprocessOptions::default()).unwrap_err();
        assert!(matches!(err, OcrFailure::Decode(_)));
    }

    #[test]
    fn test_passthrough_when_no_transform() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "wide.png", 1200, 40);

        let options = PreprocessOptions { grayscale: false, min_width: 1000 };
        let prepared = prepare_image(&path, &options).unwrap();
        assert!(!prepared.is_temporary());
        assert_eq!(prepared.path(), path.as_path());
    }

    #[test]
    fn test_upscale_small_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "small.png", 100, 50);

        let options = PreprocessOptions { grayscale: true, min_width: 400 };
        let prepared = prepare_image(&path, &options).unwrap();
        assert!(prepared.is_temporary());

        let out = image::open(prepared.path()).unwrap();
        assert_eq!(out.dimensions(), (400, 200));
    }

    #[test]
    fn test_temp_file_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "gray.png", 20, 20);

        let prepared = prepare_image(&path, &PreprocessOptions::default()).unwrap();
        let temp_path = prepared.path().to_path_buf();
        assert!(temp_path.exists());

        drop(prepared);
        assert!(!temp_path.exists());
        assert!(path.exists());
    }
}
