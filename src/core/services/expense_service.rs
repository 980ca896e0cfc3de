//! Business logic helpers for manually entered expenses.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::time::Clock;
use crate::domain::common::ensure_positive;
use crate::domain::{Attachment, DateRange, Expense, ExpenseAnalysis};
use crate::errors::{ExpenseError, Result};
use crate::storage::ExpenseStore;

/// Input for [`ExpenseService::create`].
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category_id: Uuid,
    pub description: Option<String>,
    pub is_recurring: bool,
    pub attachment: Option<Attachment>,
    pub analysis: Option<ExpenseAnalysis>,
}

impl NewExpense {
    pub fn new(date: NaiveDate, amount: Decimal, category_id: Uuid) -> Self {
        Self {
            date,
            amount,
            category_id,
            description: None,
            is_recurring: false,
            attachment: None,
            analysis: None,
        }
    }
}

/// The user-editable fields of an expense.
#[derive(Debug, Clone)]
pub struct ExpenseUpdate {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category_id: Uuid,
    pub description: Option<String>,
    pub attachment: Option<Attachment>,
}

/// Provides validated CRUD helpers for expenses.
pub struct ExpenseService;

impl ExpenseService {
    /// Stores a user-entered expense. Such expenses never carry a template link.
    pub fn create(
        expenses: &dyn ExpenseStore,
        clock: &dyn Clock,
        request: NewExpense,
    ) -> Result<Expense> {
        ensure_positive(request.amount)?;
        let expense = Expense {
            description: request.description,
            is_recurring: request.is_recurring,
            attachment: request.attachment,
            analysis: request.analysis,
            ..Expense::new(request.date, request.amount, request.category_id, clock.now())
        };
        let stored = expenses.add(expense)?;
        tracing::debug!(id = ?stored.id, date = %stored.date, amount = %stored.amount, "expense created");
        Ok(stored)
    }

    /// Rewrites the editable fields of an expense.
    ///
    /// The template link, the recurring flag, the analysis annotation, and the
    /// creation timestamp are kept as stored.
    pub fn update(expenses: &dyn ExpenseStore, id: Uuid, changes: ExpenseUpdate) -> Result<Expense> {
        ensure_positive(changes.amount)?;
        let existing = Self::get(expenses, id)?;
        let updated = Expense {
            date: changes.date,
            amount: changes.amount,
            category_id: changes.category_id,
            description: changes.description,
            attachment: changes.attachment,
            ..existing
        };
        expenses.update(&updated)?;
        tracing::debug!(%id, "expense updated");
        Ok(updated)
    }

    pub fn delete(expenses: &dyn ExpenseStore, id: Uuid) -> Result<()> {
        expenses.delete(id)?;
        tracing::debug!(%id, "expense deleted");
        Ok(())
    }

    pub fn get(expenses: &dyn ExpenseStore, id: Uuid) -> Result<Expense> {
        expenses
            .get_by_id(id)?
            .ok_or_else(|| ExpenseError::NotFound(format!("expense {id}")))
    }

    /// Expenses dated within `[start, end]`.
    pub fn list_for_period(
        expenses: &dyn ExpenseStore,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>> {
        let range = DateRange::new(start, end)?;
        expenses.get_by_period(range.start(), range.end())
    }

    pub fn list_all(expenses: &dyn ExpenseStore) -> Result<Vec<Expense>> {
        expenses.get_all()
    }
}
