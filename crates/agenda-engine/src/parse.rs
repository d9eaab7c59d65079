//! Parsing of the textual forms used by event definitions.
//!
//! - [`parse_duration`] — compact durations like `"2h"`, `"1d2h30m"`
//! - [`parse_date`] — `YYYY-MM-DD`
//! - [`parse_datetime`] — `YYYY-MM-DDTHH:MM[:SS]` (local, no offset)

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::AgendaError;

/// Parse a compact, unsigned duration.
///
/// One or more `<number><unit>` components, units `w`, `d`, `h`, `m`, `s`
/// (case-insensitive). Components add up: `"1h90m"` is 2h30m. A leading `-`
/// is rejected since event durations are never negative.
///
/// # Errors
///
/// Returns [`AgendaError::InvalidDuration`] for empty input, unknown units,
/// a number without a unit, or an overflowing total.
///
/// # Examples
///
/// ```
/// use agenda_engine::parse::parse_duration;
/// use chrono::Duration;
///
/// assert_eq!(parse_duration("1d2h30m").unwrap(), Duration::minutes(1590));
/// assert!(parse_duration("-30m").is_err());
/// ```
pub fn parse_duration(s: &str) -> Result<Duration, AgendaError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(AgendaError::InvalidDuration("empty duration".to_string()));
    }
    if s.starts_with('-') {
        return Err(AgendaError::InvalidDuration(format!(
            "duration must not be negative: '{s}'"
        )));
    }
    let rest = s.strip_prefix('+').unwrap_or(s);

    let mut total_seconds: i64 = 0;
    let mut num_buf = String::new();
    let mut found_any = false;

    for ch in rest.chars() {
        if ch.is_ascii_digit() {
            num_buf.push(ch);
            continue;
        }
        if num_buf.is_empty() {
            return Err(AgendaError::InvalidDuration(format!(
                "expected number before '{ch}' in '{s}'"
            )));
        }
        let n: i64 = num_buf
            .parse()
            .map_err(|_| AgendaError::InvalidDuration(format!("invalid number in '{s}'")))?;
        num_buf.clear();
        found_any = true;

        let multiplier = match ch.to_ascii_lowercase() {
            'w' => 604_800,
            'd' => 86_400,
            'h' => 3_600,
            'm' => 60,
            's' => 1,
            _ => {
                return Err(AgendaError::InvalidDuration(format!(
                    "unknown unit '{ch}' in '{s}'"
                )));
            }
        };
        total_seconds = n
            .checked_mul(multiplier)
            .and_then(|secs| total_seconds.checked_add(secs))
            .ok_or_else(|| AgendaError::InvalidDuration(format!("duration too large: '{s}'")))?;
    }

    if !num_buf.is_empty() {
        return Err(AgendaError::InvalidDuration(format!(
            "number without unit at end of '{s}'"
        )));
    }
    if !found_any {
        return Err(AgendaError::InvalidDuration(format!(
            "no valid components in '{s}'"
        )));
    }

    Duration::try_seconds(total_seconds)
        .ok_or_else(|| AgendaError::InvalidDuration(format!("duration too large: '{s}'")))
}

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> Result<NaiveDate, AgendaError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| AgendaError::InvalidDate(format!("'{}': {}", s, e)))
}

/// Parse a local date-time, with or without seconds.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, AgendaError> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|e| AgendaError::InvalidDatetime(format!("'{}': {}", s, e)))
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_single_units() {
        assert_eq!(parse_duration("120m").unwrap(), Duration::minutes(120));
        assert_eq!(parse_duration("2h").unwrap(), Duration::hours(2));
        assert_eq!(parse_duration("1w").unwrap(), Duration::weeks(1));
        assert_eq!(parse_duration("45S").unwrap(), Duration::seconds(45));
    }

    #[test]
    fn test_duration_compound() {
        assert_eq!(
            parse_duration("1d12h").unwrap(),
            Duration::days(1) + Duration::hours(12)
        );
        assert_eq!(parse_duration("+1h90m").unwrap(), Duration::minutes(150));
    }

    #[test]
    fn test_duration_zero_is_valid() {
        assert_eq!(parse_duration("0s").unwrap(), Duration::zero());
    }

    #[test]
    fn test_duration_negative_rejected() {
        let err = parse_duration("-30m").unwrap_err().to_string();
        assert!(err.contains("negative"), "got: {err}");
    }

    #[test]
    fn test_duration_malformed() {
        for input in ["", "   ", "+", "h", "30", "30x", "2h30"] {
            assert!(
                matches!(parse_duration(input), Err(AgendaError::InvalidDuration(_))),
                "accepted '{input}'"
            );
        }
    }

    #[test]
    fn test_duration_overflow() {
        assert!(parse_duration("99999999999999999w").is_err());
    }

    #[test]
    fn test_date() {
        assert_eq!(
            parse_date("2021-01-05").unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 5).unwrap()
        );
        let err = parse_date("2021-02-30").unwrap_err().to_string();
        assert!(err.contains("Invalid date"), "got: {err}");
    }

    #[test]
    fn test_datetime_with_and_without_seconds() {
        let expected = NaiveDate::from_ymd_opt(2020, 11, 1)
            .unwrap()
            .and_hms_opt(22, 30, 0)
            .unwrap();
        assert_eq!(parse_datetime("2020-11-01T22:30").unwrap(), expected);
        assert_eq!(parse_datetime("2020-11-01T22:30:00").unwrap(), expected);
        assert!(parse_datetime("2020-11-01").is_err());
    }
}
