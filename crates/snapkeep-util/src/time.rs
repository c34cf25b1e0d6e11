//! Timestamp pattern utilities for snapkeep
//!
//! Backup names carry their timestamp; a strftime-style pattern (chrono
//! syntax) says where. Parsing is strict: the whole name must match.
//!
//! Parsed timestamps keep the offset written in the name, so calendar
//! bucketing follows the date in the name and never the host time zone.
//! Names without an offset are taken as UTC.

use crate::{Result, SnapkeepError};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use std::fmt::Write;

/// Date only, e.g. `2000-12-31`
pub const PATTERN_ISO8601_DATE_ONLY: &str = "%Y-%m-%d";

/// ISO 8601 with dashes instead of colons so it is a valid file name, e.g.
/// `2001-01-02T03-04-05Z` or `2000-01-01T00-00-00.000+0100`.
/// The fractional seconds are optional.
pub const PATTERN_ALMOST_ISO8601_DATE_AND_TIME: &str = "%Y-%m-%dT%H-%M-%S%.f%#z";

/// Pattern used when none is configured
pub const DEFAULT_PATTERN: &str = PATTERN_ALMOST_ISO8601_DATE_AND_TIME;

/// Parse a timestamp out of `input` using `pattern`.
///
/// Tries, in order: date and time with offset (kept as written), date and
/// time without offset (taken as UTC), date only (midnight UTC).
///
/// Impossible calendar dates such as `2000-02-31` do not parse; they are
/// never rolled over into the next month.
pub fn parse_timestamp(
    input: &str,
    pattern: &str,
) -> std::result::Result<DateTime<FixedOffset>, chrono::ParseError> {
    if let Ok(dt) = DateTime::parse_from_str(input, pattern) {
        return Ok(dt);
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(input, pattern) {
        return Ok(naive.and_utc().fixed_offset());
    }

    NaiveDate::parse_from_str(input, pattern)
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc().fixed_offset())
}

/// Check that `pattern` is a usable strftime pattern.
pub fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.trim().is_empty() {
        return Err(SnapkeepError::pattern(pattern, "pattern cannot be empty"));
    }

    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(SnapkeepError::pattern(
            pattern,
            "contains an unknown or incomplete % specifier",
        ));
    }

    Ok(())
}

/// Format `dt` with `pattern`.
///
/// Parse-only specifiers such as `%#z` cannot be formatted and yield
/// [`SnapkeepError::UnformattableTimestamp`] instead of panicking.
pub fn format_timestamp(dt: &DateTime<Utc>, pattern: &str) -> Result<String> {
    validate_pattern(pattern)?;

    let mut out = String::new();
    write!(out, "{}", dt.format(pattern))
        .map_err(|_| SnapkeepError::UnformattableTimestamp(pattern.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    #[test]
    fn test_parse_date_and_time_zulu() {
        let ts = parse_timestamp("2001-01-02T03-04-05Z", DEFAULT_PATTERN).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2001, 1, 2, 3, 4, 5).unwrap());
    }

    #[test]
    fn test_parse_date_and_time_with_fraction() {
        let ts = parse_timestamp("2000-01-04T01-01-01.005Z", DEFAULT_PATTERN).unwrap();
        let expected = Utc.with_ymd_and_hms(2000, 1, 4, 1, 1, 1).unwrap()
            + chrono::Duration::milliseconds(5);
        assert_eq!(ts, expected);
    }

    #[test]
    fn test_parse_keeps_offset_of_name() {
        let ts = parse_timestamp("2001-01-01T00-30-00+0100", DEFAULT_PATTERN).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2000, 12, 31, 23, 30, 0).unwrap());
        assert_eq!(ts.offset().local_minus_utc(), 3600);
        assert_eq!((ts.year(), ts.month(), ts.day()), (2001, 1, 1));
    }

    #[test]
    fn test_parse_without_offset_is_utc() {
        let ts = parse_timestamp("2000-12-31", PATTERN_ISO8601_DATE_ONLY).unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_parse_naive_date_time_is_utc() {
        let ts = parse_timestamp("2000-06-15 12-00-00", "%Y-%m-%d %H-%M-%S").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2000, 6, 15, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_date_only() {
        let ts = parse_timestamp("2000-12-31", PATTERN_ISO8601_DATE_ONLY).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2000, 12, 31, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_non_matching_names() {
        let invalid = [
            "02.01.2000",
            "foo-2000-12-31-bar",
            "2000-12-31-bar",
            "2000-02-31",
            "2000-13-31",
            "",
        ];

        for name in &invalid {
            assert!(
                parse_timestamp(name, PATTERN_ISO8601_DATE_ONLY).is_err(),
                "Expected '{}' to fail parsing",
                name
            );
        }
    }

    #[test]
    fn test_validate_pattern() {
        assert!(validate_pattern(DEFAULT_PATTERN).is_ok());
        assert!(validate_pattern(PATTERN_ISO8601_DATE_ONLY).is_ok());

        assert!(validate_pattern("").is_err());
        assert!(validate_pattern("   ").is_err());
        assert!(validate_pattern("%Y-%m-%").is_err());
    }

    #[test]
    fn test_format_timestamp() {
        let dt = Utc.with_ymd_and_hms(2000, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(
            format_timestamp(&dt, "%Y-%m-%dT%H-%M-%S%.3fZ").unwrap(),
            "2000-01-02T00-00-00.000Z"
        );
        assert_eq!(
            format_timestamp(&dt, PATTERN_ISO8601_DATE_ONLY).unwrap(),
            "2000-01-02"
        );
    }

    #[test]
    fn test_format_rejects_invalid_pattern() {
        let dt = Utc.with_ymd_and_hms(2000, 1, 2, 0, 0, 0).unwrap();
        assert!(format_timestamp(&dt, "%Y-%").is_err());
    }
}
