//! Error types for agenda-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgendaError {
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Conflicting termination: {0}")]
    ConflictingTermination(String),
}

pub type Result<T> = std::result::Result<T, AgendaError>;
