//! # agenda-engine
//!
//! Deterministic agenda computation.
//!
//! Models calendar events that occur once or repeat every day, week or
//! month, optionally terminated by a date or an occurrence count and with
//! exception dates, and answers "is this event on day D?" and "is this slot
//! free?" without iterating over occurrences.
//!
//! ## Modules
//!
//! - [`recurrence`] — Calendar stepping: occurrence dates, alignment, date↔count conversion
//! - [`event`] — A single event with its optional recurrence
//! - [`agenda`] — Append-only event collection with day, title and free/busy queries
//! - [`definition`] — Serializable event definitions
//! - [`parse`] — Compact duration, date and date-time parsing
//! - [`error`] — Error types

pub mod agenda;
pub mod definition;
pub mod error;
pub mod event;
pub mod parse;
pub mod recurrence;

pub use agenda::Agenda;
pub use definition::EventDefinition;
pub use error::AgendaError;
pub use event::{EventSummary, OccurrenceLimit, RecurringEvent, UNBOUNDED_OCCURRENCES};
pub use recurrence::{aligned_index, occurrence_date, occurrences_until, RepetitionUnit};
