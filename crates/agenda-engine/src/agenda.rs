//! An append-only collection of events with day, title and free/busy queries.
//!
//! All queries are linear scans that preserve insertion order and return
//! borrowed views into the agenda; an empty result is an empty `Vec`.

use chrono::NaiveDate;

use crate::definition::EventDefinition;
use crate::error::AgendaError;
use crate::event::RecurringEvent;

/// An ordered, append-only list of events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Agenda {
    events: Vec<RecurringEvent>,
}

impl Agenda {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an agenda from definitions, in order.
    ///
    /// # Errors
    ///
    /// Returns the first definition error encountered; no partial agenda is
    /// returned.
    pub fn from_definitions<I>(definitions: I) -> Result<Self, AgendaError>
    where
        I: IntoIterator<Item = EventDefinition>,
    {
        definitions
            .into_iter()
            .map(EventDefinition::into_event)
            .collect()
    }

    /// Append an event. Duplicates are kept.
    pub fn add_event(&mut self, event: RecurringEvent) {
        tracing::trace!(title = event.title(), recurring = event.has_repetition(), "event added");
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecurringEvent> {
        self.events.iter()
    }

    /// Events taking place on `day`.
    pub fn events_in_day(&self, day: NaiveDate) -> Vec<&RecurringEvent> {
        self.events.iter().filter(|e| e.is_in_day(day)).collect()
    }

    /// Events whose title is exactly `title`.
    pub fn find_by_title(&self, title: &str) -> Vec<&RecurringEvent> {
        self.events.iter().filter(|e| e.title() == title).collect()
    }

    /// Non-recurring events strictly overlapping `candidate`.
    ///
    /// Recurring events are never reported, whatever their occurrences.
    pub fn conflicts_with(&self, candidate: &RecurringEvent) -> Vec<&RecurringEvent> {
        self.events
            .iter()
            .filter(|other| !other.has_repetition() && other.overlaps(candidate))
            .collect()
    }

    /// Whether `candidate` can be scheduled without overlapping a
    /// non-recurring event. Back-to-back events do not conflict.
    pub fn is_free_for(&self, candidate: &RecurringEvent) -> bool {
        let free = !self
            .events
            .iter()
            .any(|other| !other.has_repetition() && other.overlaps(candidate));
        tracing::debug!(candidate = candidate.title(), free, "free/busy check");
        free
    }
}

impl FromIterator<RecurringEvent> for Agenda {
    fn from_iter<I: IntoIterator<Item = RecurringEvent>>(iter: I) -> Self {
        let mut agenda = Agenda::new();
        agenda.extend(iter);
        agenda
    }
}

impl Extend<RecurringEvent> for Agenda {
    fn extend<I: IntoIterator<Item = RecurringEvent>>(&mut self, iter: I) {
        for event in iter {
            self.add_event(event);
        }
    }
}

impl<'a> IntoIterator for &'a Agenda {
    type Item = &'a RecurringEvent;
    type IntoIter = std::slice::Iter<'a, RecurringEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
