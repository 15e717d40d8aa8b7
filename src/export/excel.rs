//! Excel生成
//!
//! シート構成:
//! - Summary: グループごとの件数
//! - Overlap: 共通ユーザー名・ウォレット（種別, 識別子, 疑わしさ, リンク）
//! - Group A / Group B: 各グループの全識別子

use crate::error::Result;
use crate::report::{GroupSummary, Report, WalletEntry};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;
use tg_overlap_common::telegram_link;

pub fn generate_excel(report: &Report, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    write_summary(workbook.add_worksheet(), report, &header)?;
    write_overlap(workbook.add_worksheet(), report, &header)?;
    write_group(workbook.add_worksheet(), &report.group_a, &header)?;
    write_group(workbook.add_worksheet(), &report.group_b, &header)?;

    workbook.save(output_path)?;
    Ok(())
}

fn write_header(sheet: &mut Worksheet, columns: &[&str], header: &Format) -> std::result::Result<(), XlsxError> {
    for (col, title) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
    }
    Ok(())
}

fn write_summary(sheet: &mut Worksheet, report: &Report, header: &Format) -> std::result::Result<(), XlsxError> {
    sheet.set_name("Summary")?;
    write_header(sheet, &["group", "source", "images", "usernames", "wallets", "ocr errors"], header)?;

    for (i, group) in [&report.group_a, &report.group_b].iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, group.label.as_str())?;
        sheet.write_string(row, 1, group.source.as_str())?;
        sheet.write_number(row, 2, group.image_count as f64)?;
        sheet.write_number(row, 3, group.usernames.len() as f64)?;
        sheet.write_number(row, 4, group.wallets.len() as f64)?;
        sheet.write_number(row, 5, group.diagnostics.len() as f64)?;
    }

    sheet.write_string(4, 0, "mode")?;
    sheet.write_string(4, 1, report.extraction_mode.to_string())?;
    sheet.write_string(5, 0, "keyword policy")?;
    sheet.write_string(5, 1, report.keyword_policy.as_str())?;
    sheet.write_string(6, 0, "generated at")?;
    sheet.write_string(6, 1, report.generated_at.as_str())?;

    sheet.set_column_width(1, 40)?;
    Ok(())
}

fn write_overlap(sheet: &mut Worksheet, report: &Report, header: &Format) -> std::result::Result<(), XlsxError> {
    sheet.set_name("Overlap")?;
    write_header(sheet, &["kind", "identifier", "suspicious", "link"], header)?;

    let mut row = 1;
    for user in report.username_overlap.iter().flatten() {
        sheet.write_string(row, 0, "username")?;
        sheet.write_string(row, 1, format!("@{}", user.username))?;
        sheet.write_boolean(row, 2, user.suspicious)?;
        sheet.write_url(row, 3, user.link.as_str())?;
        row += 1;
    }

    for wallet in report.wallet_overlap.iter().flatten() {
        write_wallet_row(sheet, row, wallet)?;
        row += 1;
    }

    sheet.set_column_width(1, 40)?;
    sheet.set_column_width(3, 60)?;
    Ok(())
}

fn write_wallet_row(sheet: &mut Worksheet, row: u32, wallet: &WalletEntry) -> std::result::Result<(), XlsxError> {
    let kind = wallet
        .kind
        .map(|k| format!("wallet ({})", k))
        .unwrap_or_else(|| "wallet".to_string());
    sheet.write_string(row, 0, kind)?;
    sheet.write_string(row, 1, wallet.wallet.as_str())?;
    if let Some(link) = &wallet.link {
        sheet.write_url(row, 3, link.as_str())?;
    }
    Ok(())
}

fn write_group(sheet: &mut Worksheet, group: &GroupSummary, header: &Format) -> std::result::Result<(), XlsxError> {
    sheet.set_name(format!("Group {}", group.label))?;
    write_header(sheet, &["kind", "identifier", "link"], header)?;

    let mut row = 1;
    for username in &group.usernames {
        sheet.write_string(row, 0, "username")?;
        sheet.write_string(row, 1, format!("@{}", username))?;
        sheet.write_url(row, 2, telegram_link(username).as_str())?;
        row += 1;
    }
    for wallet in &group.wallets {
        let entry = WalletEntry::new(wallet);
        sheet.write_string(row, 0, "wallet")?;
        sheet.write_string(row, 1, wallet.as_str())?;
        if let Some(link) = &entry.link {
            sheet.write_url(row, 2, link.as_str())?;
        }
        row += 1;
    }

    for diagnostic in &group.diagnostics {
        row += 1;
        sheet.write_string(row, 0, "ocr error")?;
        sheet.write_string(row, 1, diagnostic.file_name.as_str())?;
        sheet.write_string(row, 2, diagnostic.message.as_str())?;
    }

    sheet.set_column_width(1, 40)?;
    sheet.set_column_width(2, 60)?;
    Ok(())
}
