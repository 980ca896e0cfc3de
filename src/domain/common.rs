//! Shared traits and small value types for expense primitives.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ExpenseError, Result};

/// Associates entities with the category they are filed under.
pub trait BelongsToCategory {
    fn category_id(&self) -> Uuid;
}

/// Supplies a common contract for retrieving monetary amounts.
pub trait Amounted {
    fn amount(&self) -> Decimal;
}

/// Anything that happened on a single calendar date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// A file linked to an expense, e.g. a scanned receipt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub path: String,
    pub mime_type: String,
}

impl Attachment {
    pub fn new(path: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// Rejects zero and negative amounts.
pub fn ensure_positive(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(ExpenseError::Validation(format!(
            "amount must be greater than zero (got {amount})"
        )));
    }
    Ok(())
}
