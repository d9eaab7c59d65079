//! Declarative event definitions, as read from JSON or other serde formats.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::AgendaError;
use crate::event::RecurringEvent;
use crate::parse::parse_duration;
use crate::recurrence::RepetitionUnit;

/// The serializable description of a [`RecurringEvent`].
///
/// ```json
/// {
///   "title": "Standup",
///   "start": "2020-11-01T09:00:00",
///   "duration": "15m",
///   "repeat": "weekly",
///   "count": 10,
///   "exceptions": ["2020-11-15"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventDefinition {
    pub title: String,
    pub start: NaiveDateTime,
    /// Compact duration, see [`parse_duration`].
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<RepetitionUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<NaiveDate>,
}

impl EventDefinition {
    /// Validate the definition and build the event.
    ///
    /// Termination and exceptions on a definition without `repeat` are
    /// accepted and have no effect, like the corresponding setters.
    ///
    /// # Errors
    ///
    /// Returns [`AgendaError::InvalidDuration`] for a malformed or negative
    /// duration, or [`AgendaError::ConflictingTermination`] when both `until`
    /// and `count` are given.
    pub fn into_event(self) -> Result<RecurringEvent, AgendaError> {
        if let (Some(until), Some(count)) = (self.until, self.count) {
            return Err(AgendaError::ConflictingTermination(format!(
                "'{}': both until {} and count {} given",
                self.title, until, count
            )));
        }

        let duration = parse_duration(&self.duration)?;
        let mut event = RecurringEvent::new(self.title, self.start, duration)?;

        if let Some(unit) = self.repeat {
            event.set_repetition(unit);
        }
        if let Some(until) = self.until {
            event.set_termination_date(until);
        }
        if let Some(count) = self.count {
            event.set_termination_count(count);
        }
        for date in self.exceptions {
            event.add_exception(date);
        }
        Ok(event)
    }
}

impl TryFrom<EventDefinition> for RecurringEvent {
    type Error = AgendaError;

    fn try_from(definition: EventDefinition) -> Result<Self, AgendaError> {
        definition.into_event()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn definition(value: serde_json::Value) -> EventDefinition {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_simple_definition() {
        let event = definition(json!({
            "title": "Simple event",
            "start": "2020-11-01T22:30:00",
            "duration": "120m"
        }))
        .into_event()
        .unwrap();
        assert!(!event.has_repetition());
        assert!(event.is_in_day(date(2020, 11, 2)));
    }

    #[test]
    fn test_weekly_definition_with_until() {
        let event = definition(json!({
            "title": "Fixed termination weekly",
            "start": "2020-11-01T22:30:00",
            "duration": "2h",
            "repeat": "weekly",
            "until": "2021-01-05"
        }))
        .into_event()
        .unwrap();
        assert_eq!(event.repetition(), Some(RepetitionUnit::Weeks));
        assert_eq!(event.number_of_occurrences(), 10);
    }

    #[test]
    fn test_count_and_exceptions() {
        let event: RecurringEvent = definition(json!({
            "title": "Daily",
            "start": "2020-11-01T08:00:00",
            "duration": "30m",
            "repeat": "days",
            "count": 5,
            "exceptions": ["2020-11-03"]
        }))
        .try_into()
        .unwrap();
        assert_eq!(event.termination_date(), Some(date(2020, 11, 5)));
        assert!(!event.is_in_day(date(2020, 11, 3)));
        assert!(event.is_in_day(date(2020, 11, 4)));
    }

    #[test]
    fn test_both_terminations_rejected() {
        let err = definition(json!({
            "title": "Both",
            "start": "2020-11-01T22:30:00",
            "duration": "2h",
            "repeat": "weekly",
            "until": "2021-01-05",
            "count": 10
        }))
        .into_event()
        .unwrap_err();
        assert!(matches!(err, AgendaError::ConflictingTermination(_)));
    }

    #[test]
    fn test_bad_duration_rejected() {
        let err = definition(json!({
            "title": "Bad",
            "start": "2020-11-01T22:30:00",
            "duration": "-5m"
        }))
        .into_event()
        .unwrap_err();
        assert!(matches!(err, AgendaError::InvalidDuration(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<EventDefinition, _> = serde_json::from_value(json!({
            "title": "Typo",
            "start": "2020-11-01T22:30:00",
            "duration": "1h",
            "repat": "weekly"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_termination_without_repeat_is_ignored() {
        let event = definition(json!({
            "title": "Lonely",
            "start": "2020-11-01T22:30:00",
            "duration": "1h",
            "count": 3,
            "exceptions": ["2020-11-01"]
        }))
        .into_event()
        .unwrap();
        assert!(event.is_in_day(date(2020, 11, 1)));
        assert_eq!(event.termination_date(), None);
    }
}
