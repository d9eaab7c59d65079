//! A single calendar event with an optional fixed-interval recurrence.
//!
//! A [`RecurringEvent`] is built once from a title, a start instant and a
//! duration, optionally configured with a [`RepetitionUnit`], a termination
//! (by date or by occurrence count) and exception dates, and then queried.
//!
//! The two termination representations are never stored side by side: the
//! limit is kept as an [`OccurrenceLimit`] and the equivalent termination
//! date is derived from it on demand.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::AgendaError;
use crate::recurrence::{self, RepetitionUnit};

/// Reported by [`RecurringEvent::number_of_occurrences`] when no limit applies.
///
/// This is the maximum of the `u32` count type (4294967295), not the 32-bit
/// signed maximum. Bounded counts are always kept below it.
pub const UNBOUNDED_OCCURRENCES: u32 = u32::MAX;

/// How many occurrences a recurring event has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum OccurrenceLimit {
    /// Recurs forever.
    #[default]
    Unbounded,
    /// Exactly this many occurrences, counting the first.
    Count(u32),
}

impl OccurrenceLimit {
    /// Whether occurrence `index` (0-based) lies within the limit.
    pub fn allows(&self, index: u32) -> bool {
        match self {
            OccurrenceLimit::Unbounded => true,
            OccurrenceLimit::Count(count) => index < *count,
        }
    }
}

/// An event occurring once, or repeatedly every day, week or month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringEvent {
    title: String,
    start: NaiveDateTime,
    duration: Duration,
    end: NaiveDateTime,
    repetition: Option<RepetitionUnit>,
    limit: OccurrenceLimit,
    exceptions: BTreeSet<NaiveDate>,
}

impl RecurringEvent {
    /// Create a non-recurring event spanning `[start, start + duration)`.
    ///
    /// # Errors
    ///
    /// Returns [`AgendaError::InvalidDuration`] if `duration` is negative or
    /// if the end instant is not representable.
    ///
    /// # Examples
    ///
    /// ```
    /// use agenda_engine::RecurringEvent;
    /// use chrono::{Duration, NaiveDate};
    ///
    /// let start = NaiveDate::from_ymd_opt(2020, 11, 1)
    ///     .unwrap()
    ///     .and_hms_opt(22, 30, 0)
    ///     .unwrap();
    /// let event = RecurringEvent::new("Review", start, Duration::minutes(120)).unwrap();
    /// // Runs past midnight, so it is on both days
    /// assert!(event.is_in_day(start.date()));
    /// assert!(event.is_in_day(start.date().succ_opt().unwrap()));
    /// ```
    pub fn new(
        title: impl Into<String>,
        start: NaiveDateTime,
        duration: Duration,
    ) -> Result<Self, AgendaError> {
        let title = title.into();
        if duration < Duration::zero() {
            return Err(AgendaError::InvalidDuration(format!(
                "'{}': duration must not be negative, got {}s",
                title,
                duration.num_seconds()
            )));
        }
        let end = start.checked_add_signed(duration).ok_or_else(|| {
            AgendaError::InvalidDuration(format!("'{}': end instant out of range", title))
        })?;

        Ok(Self {
            title,
            start,
            duration,
            end,
            repetition: None,
            limit: OccurrenceLimit::Unbounded,
            exceptions: BTreeSet::new(),
        })
    }

    // ── Configuration ───────────────────────────────────────────────────

    /// Make the event recur every `unit`.
    ///
    /// Calling this again replaces the unit; an existing count limit keeps
    /// its count and is reinterpreted in the new unit, clamped like
    /// [`set_termination_count`](Self::set_termination_count).
    pub fn set_repetition(&mut self, unit: RepetitionUnit) {
        if let Some(previous) = self.repetition.replace(unit) {
            tracing::debug!(title = %self.title, %previous, %unit, "repetition replaced");
            if let OccurrenceLimit::Count(count) = self.limit {
                self.limit = OccurrenceLimit::Count(self.representable_count(unit, count));
            }
        } else {
            tracing::trace!(title = %self.title, %unit, "repetition set");
        }
    }

    /// Stop the series after the last occurrence starting on or before `date`.
    ///
    /// No-op on a non-recurring event.
    pub fn set_termination_date(&mut self, date: NaiveDate) {
        let Some(unit) = self.repetition else {
            tracing::trace!(title = %self.title, %date, "termination ignored: not recurring");
            return;
        };
        let count = recurrence::occurrences_until(self.start.date(), unit, date);
        tracing::trace!(title = %self.title, %date, count, "termination date converted to count");
        self.limit = OccurrenceLimit::Count(count);
    }

    /// Stop the series after `count` occurrences, counting the first.
    ///
    /// Counts reaching past the last representable date are clamped to the
    /// occurrences that fit, so the count and the termination date always
    /// describe the same last occurrence.
    ///
    /// No-op on a non-recurring event.
    pub fn set_termination_count(&mut self, count: u32) {
        let Some(unit) = self.repetition else {
            tracing::trace!(title = %self.title, count, "termination ignored: not recurring");
            return;
        };
        let clamped = self.representable_count(unit, count);
        if clamped != count {
            tracing::debug!(title = %self.title, count, clamped, "termination count clamped");
        }
        self.limit = OccurrenceLimit::Count(clamped);
    }

    /// `count` capped at the occurrences starting on or before
    /// `NaiveDate::MAX`, and below [`UNBOUNDED_OCCURRENCES`].
    fn representable_count(&self, unit: RepetitionUnit, count: u32) -> u32 {
        let max = recurrence::occurrences_until(self.start.date(), unit, NaiveDate::MAX);
        count.min(max).min(UNBOUNDED_OCCURRENCES - 1)
    }

    /// Suppress the occurrence starting on `date`.
    ///
    /// No-op on a non-recurring event.
    pub fn add_exception(&mut self, date: NaiveDate) {
        if self.repetition.is_none() {
            tracing::trace!(title = %self.title, %date, "exception ignored: not recurring");
            return;
        }
        self.exceptions.insert(date);
    }

    /// Builder form of [`set_repetition`](Self::set_repetition).
    pub fn with_repetition(mut self, unit: RepetitionUnit) -> Self {
        self.set_repetition(unit);
        self
    }

    /// Builder form of [`set_termination_date`](Self::set_termination_date).
    pub fn until(mut self, date: NaiveDate) -> Self {
        self.set_termination_date(date);
        self
    }

    /// Builder form of [`set_termination_count`](Self::set_termination_count).
    pub fn with_occurrences(mut self, count: u32) -> Self {
        self.set_termination_count(count);
        self
    }

    /// Builder form of [`add_exception`](Self::add_exception).
    pub fn except(mut self, date: NaiveDate) -> Self {
        self.add_exception(date);
        self
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// End instant of the first occurrence (`start + duration`).
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn repetition(&self) -> Option<RepetitionUnit> {
        self.repetition
    }

    pub fn has_repetition(&self) -> bool {
        self.repetition.is_some()
    }

    /// The stored limit. Always `Unbounded` for a non-recurring event.
    pub fn occurrence_limit(&self) -> OccurrenceLimit {
        self.limit
    }

    pub fn exceptions(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.exceptions.iter().copied()
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Number of occurrences, or [`UNBOUNDED_OCCURRENCES`] when the event is
    /// not recurring or has no termination.
    pub fn number_of_occurrences(&self) -> u32 {
        match (self.repetition, self.limit) {
            (Some(_), OccurrenceLimit::Count(count)) => count,
            _ => UNBOUNDED_OCCURRENCES,
        }
    }

    /// Date of the last occurrence, or `None` without a termination.
    ///
    /// A limit of 0 occurrences (termination before the start) yields the
    /// date one unit before the start, which converts back to a count of 0.
    pub fn termination_date(&self) -> Option<NaiveDate> {
        match (self.repetition, self.limit) {
            (Some(unit), OccurrenceLimit::Count(count)) => {
                recurrence::occurrence_date(self.start.date(), unit, i64::from(count) - 1)
            }
            _ => None,
        }
    }

    /// Start instant of occurrence `index`, or `None` if that occurrence does
    /// not exist (beyond the limit, on an exception date, or `index > 0` for
    /// a non-recurring event).
    pub fn occurrence_start(&self, index: u32) -> Option<NaiveDateTime> {
        let Some(unit) = self.repetition else {
            return (index == 0).then_some(self.start);
        };
        if !self.limit.allows(index) {
            return None;
        }
        let date = recurrence::occurrence_date(self.start.date(), unit, i64::from(index))?;
        if self.exceptions.contains(&date) {
            return None;
        }
        Some(date.and_time(self.start.time()))
    }

    /// Whether the event takes place on `day`.
    ///
    /// A non-recurring event is on every day its span touches. The end is
    /// inclusive, so an event ending exactly at midnight is also on the day
    /// that midnight starts.
    ///
    /// A recurring event is on `day` only when an occurrence starts that day,
    /// within the limit, and `day` is not an exception.
    pub fn is_in_day(&self, day: NaiveDate) -> bool {
        match self.repetition {
            None => self.span_touches(day),
            Some(unit) => match recurrence::aligned_index(self.start.date(), unit, day) {
                Some(index) => self.limit.allows(index) && !self.exceptions.contains(&day),
                None => false,
            },
        }
    }

    /// Whether `[start, end]` meets the 24 hours of `day`.
    ///
    /// Midnight is inclusive on both sides: an event ending exactly at the
    /// midnight closing `day` is on `day`, including a zero-length event
    /// sitting on that midnight.
    fn span_touches(&self, day: NaiveDate) -> bool {
        let day_start = day.and_time(NaiveTime::MIN);
        let reaches_day = match day.succ_opt() {
            Some(next) => {
                let day_end = next.and_time(NaiveTime::MIN);
                self.start < day_end || self.end == day_end
            }
            None => true,
        };
        self.end >= day_start && reaches_day
    }

    /// Strict overlap of the first occurrences: touching endpoints do not count.
    pub fn overlaps(&self, other: &RecurringEvent) -> bool {
        self.end > other.start && other.end > self.start
    }

    /// A serializable view of the event and its derived recurrence metadata.
    pub fn summary(&self) -> EventSummary {
        let occurrences = match self.number_of_occurrences() {
            UNBOUNDED_OCCURRENCES => None,
            count => Some(count),
        };
        EventSummary {
            title: self.title.clone(),
            start: self.start,
            end: self.end,
            duration_seconds: self.duration.num_seconds(),
            repetition: self.repetition,
            occurrences,
            termination_date: self.termination_date(),
            exceptions: self.exceptions.iter().copied().collect(),
        }
    }
}

impl fmt::Display for RecurringEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} min",
            self.title,
            self.start.format("%Y-%m-%d %H:%M"),
            self.duration.num_minutes()
        )?;
        if let Some(unit) = self.repetition {
            write!(f, ", {unit}")?;
        }
        f.write_str(")")
    }
}

/// Snapshot of a [`RecurringEvent`] for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_seconds: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetition: Option<RepetitionUnit>,
    /// Absent when unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<NaiveDate>,
}

// ── Tests ───────────────────────────────────────────────────────────────────
