//! Formatting utilities for timestamps and tokens.

use crate::config::MS_PER_SECOND;

/// Format epoch milliseconds as `YYYY-MM-DD HH:MM:SS` (UTC).
pub fn format_timestamp(ms: u64) -> String {
    let secs = ms / MS_PER_SECOND as u64;
    let hour = (secs % 86400) / 3600;
    let min = (secs % 3600) / 60;
    let sec = secs % 60;
    format!("{} {:02}:{:02}:{:02}", format_date_iso(secs), hour, min, sec)
}

/// Format Unix timestamp as ISO date (YYYY-MM-DD).
///
/// Converts days since the epoch to a proleptic Gregorian civil date in
/// constant time.
pub fn format_date_iso(timestamp: u64) -> String {
    let days = (timestamp / 86400) as i64;

    // Shift the epoch to 0000-03-01 so leap days fall at the end of a year.
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let day_of_era = z.rem_euclid(146_097);
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;

    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * 400 + i64::from(month <= 2);

    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Shorten a long token for list display (`eyJhbG...w5c`).
pub fn abbreviate_token(token: &str, keep: usize) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= keep * 2 + 3 {
        return token.to_string();
    }
    let head: String = chars[..keep].iter().collect();
    let tail: String = chars[chars.len() - keep..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_iso() {
        // Unix epoch
        assert_eq!(format_date_iso(0), "1970-01-01");
        // 2024-01-01 00:00:00 UTC = 1704067200
        assert_eq!(format_date_iso(1704067200), "2024-01-01");
        // Leap day
        assert_eq!(format_date_iso(1709164800), "2024-02-29");
    }

    #[test]
    fn test_format_date_iso_far_future() {
        assert_eq!(format_date_iso(253_402_300_799), "9999-12-31");
        assert_eq!(format_date_iso(951_782_400), "2000-02-29");
        // Corrupt persisted values still format immediately.
        assert!(format_date_iso(u64::MAX).len() > 10);
        assert!(format_timestamp(u64::MAX).ends_with(":51"));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00");
        // 2023-11-14 22:13:20 UTC
        assert_eq!(format_timestamp(1_700_000_000_000), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_abbreviate_token() {
        assert_eq!(abbreviate_token("short", 4), "short");
        assert_eq!(abbreviate_token("abcdefghijklmnop", 3), "abc...nop");
    }
}
