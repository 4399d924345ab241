/// `m:ss`, minutes unbounded.
pub fn format_time(total_seconds: u64) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Parses `mm:ss` or `hh:mm:ss`; anything else, including values that do
/// not fit in a `u64`, is 0.
pub fn parse_time_to_seconds(time: &str) -> u64 {
    let parts: Result<Vec<u64>, _> = time.trim().split(':').map(str::parse::<u64>).collect();
    let seconds = match parts.as_deref() {
        Ok([mm, ss]) => mm.checked_mul(60).and_then(|s| s.checked_add(*ss)),
        Ok([hh, mm, ss]) => hh
            .checked_mul(3600)
            .and_then(|s| s.checked_add(mm.checked_mul(60)?))
            .and_then(|s| s.checked_add(*ss)),
        _ => None,
    };
    seconds.unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(59), "0:59");
        assert_eq!(format_time(192), "3:12");
        assert_eq!(format_time(3600), "60:00");
    }

    #[test]
    fn test_parse_time_to_seconds() {
        assert_eq!(parse_time_to_seconds("03:12"), 192);
        assert_eq!(parse_time_to_seconds("1:00:05"), 3605);
        assert_eq!(parse_time_to_seconds("abc"), 0);
        assert_eq!(parse_time_to_seconds("12"), 0);
        assert_eq!(parse_time_to_seconds("1:x"), 0);
    }

    #[test]
    fn test_parse_time_to_seconds_overflow_is_zero() {
        assert_eq!(parse_time_to_seconds("999999999999999999:00"), 0);
        assert_eq!(parse_time_to_seconds("9999999999999999:00:00"), 0);
        assert_eq!(parse_time_to_seconds("0:18446744073709551615"), u64::MAX);
        assert_eq!(parse_time_to_seconds("1:18446744073709551615"), 0);
    }
}
