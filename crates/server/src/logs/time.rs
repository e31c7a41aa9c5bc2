//! Timestamp parsing for `startTime` / `endTime` tool parameters.
//!
//! Accepts either an absolute date-time or a relative duration-before-now
//! such as `"5m"`, `"1h"`, `"1d"`. Absolute forms are tried first.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::client::error::LogsError;

/// Parse a time parameter into epoch milliseconds.
///
/// An empty string means "no timestamp" and yields `Ok(None)` — distinct
/// from a parse result of zero. Unit suffixes are lowercase `s`, `m`,
/// `h`, `d` and must follow a non-negative all-digit value; anything
/// else fails with [`LogsError::InvalidTimeFormat`] carrying the
/// offending string.
pub fn parse_time(input: &str) -> Result<Option<i64>, LogsError> {
    if input.is_empty() {
        return Ok(None);
    }
    if let Some(ms) = parse_absolute(input) {
        return Ok(Some(ms));
    }
    if let Some(ms) = parse_relative(input, Utc::now().timestamp_millis()) {
        return Ok(Some(ms));
    }
    Err(LogsError::InvalidTimeFormat(input.to_string()))
}

/// Absolute forms: RFC 3339 (a trailing `Z` is a zero offset), then a
/// naive date-time, then a bare date. Naive values are interpreted in
/// the local time zone, matching the historical behavior of this tool.
fn parse_absolute(input: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return local_millis(naive);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%.f") {
        return local_millis(naive);
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return local_millis(date.and_hms_opt(0, 0, 0)?);
    }
    None
}

fn local_millis(naive: NaiveDateTime) -> Option<i64> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}

/// Relative form: `<digits><unit>`, evaluated against `now_ms`.
///
/// The digit check requires an all-digit prefix, so negative and
/// fractional values fail here and surface as `InvalidTimeFormat`.
fn parse_relative(input: &str, now_ms: i64) -> Option<i64> {
    let unit = input.chars().last()?;
    let unit_seconds: i64 = match unit {
        's' => 1,
        'm' => 60,
        'h' => 3600,
        'd' => 86400,
        _ => return None,
    };
    let digits = &input[..input.len() - unit.len_utf8()];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: i64 = digits.parse().ok()?;
    let offset_ms = value.checked_mul(unit_seconds)?.checked_mul(1000)?;
    now_ms.checked_sub(offset_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_no_timestamp() {
        assert_eq!(parse_time("").unwrap(), None);
    }

    #[test]
    fn test_rfc3339_with_utc_designator() {
        // 2024-05-01T12:00:00Z
        assert_eq!(
            parse_time("2024-05-01T12:00:00Z").unwrap(),
            Some(1_714_564_800_000)
        );
    }

    #[test]
    fn test_rfc3339_with_explicit_offset() {
        // 14:30 at +02:00 is 12:30 UTC.
        assert_eq!(
            parse_time("2024-05-01T14:30:00+02:00").unwrap(),
            Some(1_714_566_600_000)
        );
    }

    #[test]
    fn test_naive_datetime_uses_local_clock() {
        let expected = Local
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .earliest()
            .map(|dt| dt.timestamp_millis());
        assert_eq!(parse_time("2024-05-01T12:00:00").unwrap(), expected);
    }

    #[test]
    fn test_bare_date_is_local_midnight() {
        let expected = Local
            .with_ymd_and_hms(2024, 5, 1, 0, 0, 0)
            .earliest()
            .map(|dt| dt.timestamp_millis());
        assert_eq!(parse_time("2024-05-01").unwrap(), expected);
    }

    #[test]
    fn test_relative_units() {
        for (input, seconds) in [("30s", 30i64), ("5m", 300), ("2h", 7200), ("1d", 86400)] {
            let now_ms = Utc::now().timestamp_millis();
            let parsed = parse_time(input).unwrap().unwrap();
            let skew = (now_ms - seconds * 1000 - parsed).abs();
            assert!(skew < 2000, "{input}: skew {skew}ms too large");
        }
    }

    #[test]
    fn test_relative_zero_is_roughly_now() {
        let now_ms = Utc::now().timestamp_millis();
        let parsed = parse_time("0s").unwrap().unwrap();
        assert!((now_ms - parsed).abs() < 2000);
    }

    #[test]
    fn test_relative_is_pure_against_fixed_clock() {
        assert_eq!(parse_relative("1h", 10_000_000_000), Some(10_000_000_000 - 3_600_000));
        assert_eq!(parse_relative("0m", 42), Some(42));
    }

    #[test]
    fn test_invalid_forms_fail() {
        for input in ["abc", "-5m", "5x", "m", "5.5h", "5M", "2H", "1 h", "h5"] {
            match parse_time(input) {
                Err(LogsError::InvalidTimeFormat(offending)) => assert_eq!(offending, input),
                other => panic!("{input}: expected InvalidTimeFormat, got {other:?}"),
            }
        }
    }
}
