//! Calendar stepping for fixed-interval recurrences.
//!
//! Every function here is pure and O(1): occurrence `k` is computed directly
//! from the series start rather than by walking earlier occurrences, so
//! membership and termination queries cost the same at +5 years as at +1 day.
//!
//! # Functions
//!
//! - [`occurrence_date`] — date of occurrence `k`
//! - [`aligned_index`] — which occurrence (if any) starts on a given day
//! - [`occurrences_until`] — how many occurrences start on or before a date

use std::fmt;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// The fixed unit separating two consecutive occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepetitionUnit {
    /// Every calendar day.
    #[serde(alias = "daily")]
    Days,
    /// Every 7 days, same weekday as the start.
    #[serde(alias = "weekly")]
    Weeks,
    /// Same day-of-month as the start, clamped to the end of shorter months.
    #[serde(alias = "monthly")]
    Months,
}

impl fmt::Display for RepetitionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RepetitionUnit::Days => "daily",
            RepetitionUnit::Weeks => "weekly",
            RepetitionUnit::Months => "monthly",
        };
        f.write_str(name)
    }
}

/// Date of occurrence `k` of a series starting on `start`.
///
/// `k` may be negative (steps backwards). Months are always added to `start`
/// itself, so a series starting on the 31st lands on Feb 28/29 in February
/// and returns to the 31st in March.
///
/// Returns `None` when the result falls outside chrono's representable range.
///
/// # Examples
///
/// ```
/// use agenda_engine::recurrence::{occurrence_date, RepetitionUnit};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2020, 11, 1).unwrap();
/// let tenth = occurrence_date(start, RepetitionUnit::Weeks, 9).unwrap();
/// assert_eq!(tenth, NaiveDate::from_ymd_opt(2021, 1, 3).unwrap());
/// ```
pub fn occurrence_date(start: NaiveDate, unit: RepetitionUnit, k: i64) -> Option<NaiveDate> {
    match unit {
        RepetitionUnit::Days => start.checked_add_signed(Duration::try_days(k)?),
        RepetitionUnit::Weeks => start.checked_add_signed(Duration::try_weeks(k)?),
        RepetitionUnit::Months => {
            let months = Months::new(u32::try_from(k.unsigned_abs()).ok()?);
            if k >= 0 {
                start.checked_add_months(months)
            } else {
                start.checked_sub_months(months)
            }
        }
    }
}

/// The occurrence index `k >= 0` whose date is exactly `day`, if any.
///
/// Solves for `k` instead of iterating: day and week series use the day
/// difference, month series use the whole-month difference and then check
/// that the clamped date really is `day`.
pub fn aligned_index(start: NaiveDate, unit: RepetitionUnit, day: NaiveDate) -> Option<u32> {
    if day < start {
        return None;
    }

    let days = day.signed_duration_since(start).num_days();
    let index = match unit {
        RepetitionUnit::Days => days,
        RepetitionUnit::Weeks => {
            if days % 7 != 0 {
                return None;
            }
            days / 7
        }
        RepetitionUnit::Months => {
            let months = month_index(day) - month_index(start);
            if occurrence_date(start, unit, months)? != day {
                return None;
            }
            months
        }
    };

    u32::try_from(index).ok()
}

/// Number of occurrences (counting occurrence 0) whose date is `<= end`.
///
/// Returns 0 when `end` is before `start`. Saturates at `u32::MAX`.
///
/// # Examples
///
/// ```
/// use agenda_engine::recurrence::{occurrences_until, RepetitionUnit};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2020, 11, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2021, 1, 5).unwrap();
/// assert_eq!(occurrences_until(start, RepetitionUnit::Weeks, end), 10);
/// ```
pub fn occurrences_until(start: NaiveDate, unit: RepetitionUnit, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }

    let days = end.signed_duration_since(start).num_days();
    let last = match unit {
        RepetitionUnit::Days => days,
        RepetitionUnit::Weeks => days / 7,
        RepetitionUnit::Months => {
            let months = month_index(end) - month_index(start);
            match occurrence_date(start, unit, months) {
                Some(date) if date <= end => months,
                _ => months - 1,
            }
        }
    };

    u32::try_from(last + 1).unwrap_or(u32::MAX)
}

/// Months since year 0, for whole-month differences.
fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

// ── Tests ───────────────────────────────────────────────────────────────────
