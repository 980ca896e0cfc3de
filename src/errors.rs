use std::result::Result as StdResult;

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Error type shared by the calendar, services, and storage backends.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("Recurring expense {0} is already stopped")]
    AlreadyStopped(Uuid),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unsupported recurrence interval: every {0} months")]
    UnsupportedInterval(u32),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, ExpenseError>;

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        ExpenseError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        ExpenseError::Storage(err.to_string())
    }
}
