use std::convert::TryFrom;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

pub fn to_u8(value: i64, field: &str) -> Result<u8> {
    u8::try_from(value).map_err(|_| anyhow!("{field} contains out-of-range value {value}"))
}

pub fn to_u32(value: i64, field: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| anyhow!("{field} contains out-of-range value {value}"))
}

/// Current time at the precision timestamps are stored with.
pub fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 so stored timestamps sort as text.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

/// Case-folded title stored beside `lesson_title` for search and sorting.
pub fn title_key(title: &str) -> String {
    title.to_lowercase()
}

/// Escape `%`, `_` and the escape character itself for a `LIKE ... ESCAPE '\'` pattern.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn datetimes_round_trip_at_micro_precision() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        let stored = format_datetime(&at);
        assert_eq!(stored, "2024-03-01T08:30:00.000000Z");
        assert_eq!(parse_datetime(&stored, "created_at").unwrap(), at);
        assert!(parse_datetime("yesterday", "created_at").is_err());
    }

    #[test]
    fn like_patterns_escape_wildcards() {
        assert_eq!(like_pattern("bio"), "%bio%");
        assert_eq!(like_pattern("100%_sure\\"), "%100\\%\\_sure\\\\%");
    }

    #[test]
    fn title_keys_fold_non_ascii_case() {
        assert_eq!(title_key("Économie BASICS"), "économie basics");
        assert_eq!(title_key("ΦΥΣΙΚΗ"), "φυσικη");
    }

    #[test]
    fn narrowing_rejects_out_of_range_values() {
        assert_eq!(to_u8(100, "score").unwrap(), 100);
        assert!(to_u8(-1, "score").is_err());
        assert!(to_u32(i64::MAX, "time_spent").is_err());
    }
}
