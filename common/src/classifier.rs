//! OCR行の分類
//!
//! 「最終ログイン」表示（last seen / laatst gezien）をノイズとして判定する。
//! ノイズ行はユーザー名抽出の対象外だが、ウォレット抽出は全行に対して行う。

/// ノイズ行の接頭辞（小文字）
pub const NOISE_PREFIXES: &[&str] = &[
    "last seen",
    "seen",
    "recently seen",
    "laatst gezien",
    "gezien",
    "recent gezien",
];

/// 行がノイズ（最終ログイン表示）かどうか
///
/// 入力はトリム済みの行を想定
pub fn is_noise_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    NOISE_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_seen_variants() {
        assert!(is_noise_line("Last seen recently"));
        assert!(is_noise_line("last seen 5 minutes ago"));
        assert!(is_noise_line("Seen 12:04"));
        assert!(is_noise_line("recently seen"));
        assert!(is_noise_line("LAST SEEN WITHIN A WEEK"));
    }

    #[test]
    fn test_dutch_variants() {
        assert!(is_noise_line("Laatst gezien 2 uur geleden"));
        assert!(is_noise_line("gezien om 14:02"));
        assert!(is_noise_line("Recent gezien"));
    }

    #[test]
    fn test_identifier_lines_are_not_noise() {
        assert!(!is_noise_line("@cryptoking123"));
        assert!(!is_noise_line("bot_admin99 online"));
        assert!(!is_noise_line("rH7x9K2mQP"));
    }

    #[test]
    fn test_prefix_only_not_substring() {
        // 行頭のみ判定（途中の "seen" は対象外）
        assert!(!is_noise_line("wallet rH7x9K2mQP seen here"));
        assert!(!is_noise_line("@admin last seen"));
    }
}
