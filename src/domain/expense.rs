//! Concrete expense records, entered by hand or generated from a template.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::errors::{ExpenseError, Result};

/// Free-form annotation attached by an external analyzer; opaque to this crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Option<Uuid>,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_expense_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ExpenseAnalysis>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        category_id: Uuid,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            date,
            amount,
            category_id,
            description: None,
            is_recurring: false,
            recurring_expense_id: None,
            attachment: None,
            analysis: None,
            created_at,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive(self.amount)?;
        if self.recurring_expense_id.is_some() && !self.is_recurring {
            return Err(ExpenseError::Validation(
                "expense linked to a recurring template must be flagged as recurring".into(),
            ));
        }
        Ok(())
    }
}

impl BelongsToCategory for Expense {
    fn category_id(&self) -> Uuid {
        self.category_id
    }
}

impl Amounted for Expense {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Dated for Expense {
    fn date(&self) -> NaiveDate {
        self.date
    }
}
