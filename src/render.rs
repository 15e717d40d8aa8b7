//! 端末への結果表示

use crate::report::{GroupSummary, Report};
use tg_overlap_common::{telegram_link, Diagnostic, GroupExtraction};

pub fn print_report(report: &Report) {
    println!("\n📊 結果");
    println!(
        "  グループA ({}): ユーザー {}件 / ウォレット {}件",
        report.group_a.source,
        report.group_a.usernames.len(),
        report.group_a.wallets.len()
    );
    println!(
        "  グループB ({}): ユーザー {}件 / ウォレット {}件",
        report.group_b.source,
        report.group_b.usernames.len(),
        report.group_b.wallets.len()
    );

    match &report.username_overlap {
        None => println!("\nℹ ユーザー名照合: 両グループの画像が必要なためスキップ"),
        Some(users) if users.is_empty() => println!("\n✅ 重複するユーザーは見つかりませんでした"),
        Some(users) => {
            println!("\n⚠️ 重複ユーザー: {}件", users.len());
            for user in users {
                let flag = if user.suspicious { " 🚩 要注意" } else { "" };
                println!("  @{}  {}{}", user.username, user.link, flag);
            }
        }
    }

    match &report.wallet_overlap {
        None => {}
        Some(wallets) if wallets.is_empty() => println!("\n✅ 重複するウォレットは見つかりませんでした"),
        Some(wallets) => {
            println!("\n⚠️ 重複ウォレット: {}件", wallets.len());
            for wallet in wallets {
                match &wallet.link {
                    Some(link) => println!("  {}  {}", wallet.wallet, link),
                    None => println!("  {}  (断片)", wallet.wallet),
                }
            }
        }
    }

    print_group_diagnostics(&report.group_a);
    print_group_diagnostics(&report.group_b);
}

fn print_group_diagnostics(group: &GroupSummary) {
    print_diagnostics(&format!("グループ{}", group.label), &group.diagnostics);
}

pub fn print_diagnostics(label: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    println!("\n❌ {} OCRエラー: {}件", label, diagnostics.len());
    for d in diagnostics {
        println!("  {}: {}", d.file_name, d.message);
    }
}

/// extractコマンド用: 1グループの全識別子を表示
pub fn print_extraction(group: &GroupExtraction) {
    let ids = &group.identifiers;

    println!("\n👤 ユーザー: {}件", ids.username_count());
    for username in &ids.usernames {
        println!("  @{}  {}", username, telegram_link(username));
    }

    println!("\n💰 ウォレット: {}件", ids.wallet_count());
    for wallet in &ids.wallets() {
        println!("  {}", wallet);
    }

    print_diagnostics("画像", &group.diagnostics);
}

pub fn print_awaiting_input() {
    println!("📎 両グループのスクリーンショット、または手入力ウォレットを指定してください。");
}
