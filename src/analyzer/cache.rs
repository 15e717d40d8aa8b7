//! OCRテキストキャッシュモジュール
//!
//! 画像のSHA-256ハッシュをキーにしてOCRテキストをキャッシュし、
//! 同じ画像の再OCRをスキップする。抽出は毎回キャッシュ済みテキストから行うため、
//! 抽出方式やキーワードを変えてもキャッシュはそのまま使える。

use crate::error::Result;
use crate::scanner::ImageInfo;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::warn;

const CACHE_FILE_NAME: &str = ".ocr-cache.json";

/// キャッシュファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    /// バージョン（互換性チェック用）
    version: u32,
    /// ファイルハッシュ → OCRテキストのマップ
    entries: HashMap<String, CacheEntry>,
}

/// キャッシュエントリ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub file_name: String,
    pub file_size: u64,
    pub text: String,
}

impl CacheFile {
    const CURRENT_VERSION: u32 = 1;

    pub fn cache_path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// キャッシュファイルを読み込み（破損・バージョン不一致は空として扱う）
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, CacheFile>(reader) {
            Ok(cache) if cache.version == Self::CURRENT_VERSION => cache,
            Ok(_) => {
                warn!(path = %cache_path.display(), "キャッシュバージョン不一致、再生成します");
                Self::default()
            }
            Err(e) => {
                warn!(path = %cache_path.display(), error = %e, "キャッシュが破損しています、無視します");
                Self::default()
            }
        }
    }

    pub fn save(&self, folder: &Path) -> Result<()> {
        let file = File::create(Self::cache_path(folder))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// キャッシュファイルを削除。存在しなければfalse
    pub fn clear(folder: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(cache_path)?;
        Ok(true)
    }

    pub fn get(&self, hash: &str) -> Option<&str> {
        self.entries.get(hash).map(|e| e.text.as_str())
    }

    pub fn insert(&mut self, hash: String, file_name: String, file_size: u64, text: String) {
        self.entries.insert(hash, CacheEntry {
            file_name,
            file_size,
            text,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CacheFile {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// 画像ファイルのSHA-256（16進）
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// キャッシュ済み画像と未キャッシュ画像に分ける
///
/// - キャッシュ済み: (画像, OCRテキスト)
/// - 未キャッシュ: (画像, ハッシュ) ※ハッシュ計算に失敗した場合は空文字
pub fn partition_cached(
    images: &[ImageInfo],
    cache: &CacheFile,
) -> (Vec<(ImageInfo, String)>, Vec<(ImageInfo, String)>) {
    let mut cached = Vec::new();
    let mut uncached = Vec::new();

    for img in images {
        let hash = match compute_file_hash(&img.path) {
            Ok(h) => h,
            Err(_) => {
                uncached.push((img.clone(), String::new()));
                continue;
            }
        };

        match cache.get(&hash) {
            Some(text) => cached.push((img.clone(), text.to_string())),
            None => uncached.push((img.clone(), hash)),
        }
    }

    (cached, uncached)
}
