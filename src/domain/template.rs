//! Recurring expense templates and their generation watermark.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{ensure_positive, Attachment};
use crate::domain::recurrence::{next_occurrence, RecurrenceInterval};
use crate::errors::{ExpenseError, Result};

/// Describes an expense that repeats on a fixed schedule.
///
/// `last_generated_date` is the watermark: the date of the most recent occurrence
/// already materialized as an [`Expense`](crate::domain::Expense). It only ever
/// moves forward, and only through the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringExpenseTemplate {
    pub id: Option<Uuid>,
    pub name: String,
    pub amount: Decimal,
    pub category_id: Uuid,
    pub interval: RecurrenceInterval,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    #[serde(default)]
    pub last_generated_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl RecurringExpenseTemplate {
    pub fn new(
        name: impl Into<String>,
        amount: Decimal,
        category_id: Uuid,
        interval: RecurrenceInterval,
        start_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            amount,
            category_id,
            interval,
            start_date,
            end_date: None,
            description: None,
            attachment: None,
            last_generated_date: None,
            created_at,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.end_date.is_some()
    }

    /// The first date the generator has not materialized yet, if any remains.
    pub fn next_due(&self) -> Option<NaiveDate> {
        let candidate = match self.last_generated_date {
            Some(last) => next_occurrence(last, self.interval),
            None => self.start_date,
        };
        match self.end_date {
            Some(end) if candidate > end => None,
            _ => Some(candidate),
        }
    }

    /// Returns a copy whose watermark sits on `date`; `self` is left untouched.
    pub fn with_watermark(&self, date: NaiveDate) -> Self {
        Self {
            last_generated_date: Some(date),
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ExpenseError::Validation(
                "recurring expense name must not be empty".into(),
            ));
        }
        ensure_positive(self.amount)?;
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ExpenseError::Validation(format!(
                    "end date {end} precedes start date {}",
                    self.start_date
                )));
            }
        }
        Ok(())
    }
}
