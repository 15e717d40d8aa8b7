//! 改行区切りCSV出力
//!
//! ヘッダなし・1行1識別子。ユーザー名は `@` 付き。
//! 未照合（None）の共通部分ファイルは作らない。

use crate::error::Result;
use crate::report::Report;
use std::path::{Path, PathBuf};
use tg_overlap_common::{usernames_to_lines, wallets_to_lines};

pub const OVERLAP_USERS: &str = "overlapping_users.csv";
pub const OVERLAP_WALLETS: &str = "overlapping_wallets.csv";

pub fn write_csv_files(report: &Report, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<(String, String)> = Vec::new();

    if report.username_overlap.is_some() {
        files.push((OVERLAP_USERS.into(), usernames_to_lines(&report.overlap_usernames())));
    }
    if report.wallet_overlap.is_some() {
        files.push((OVERLAP_WALLETS.into(), wallets_to_lines(&report.overlap_wallets())));
    }

    for group in [&report.group_a, &report.group_b] {
        let prefix = format!("group_{}", group.label.to_lowercase());
        files.push((format!("{}_users.csv", prefix), usernames_to_lines(&group.usernames)));
        files.push((format!("{}_wallets.csv", prefix), wallets_to_lines(&group.wallets)));
    }

    let mut written = Vec::with_capacity(files.len());
    for (name, content) in files {
        let path = output_dir.join(name);
        std::fs::write(&path, content)?;
        written.push(path);
    }

    Ok(written)
}
