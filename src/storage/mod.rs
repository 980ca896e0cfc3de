//! Store interfaces consumed by the services, plus two bundled backends.
//!
//! Each call is expected to complete or fail atomically on its own; the services
//! never batch several calls into a transaction.

pub mod json_backend;
pub mod memory;
mod state;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Expense, RecurringExpenseTemplate};
use crate::errors::Result;

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
pub use state::StoreSnapshot;

/// Persistence for recurring expense templates.
pub trait TemplateStore: Send + Sync {
    fn get_all(&self) -> Result<Vec<RecurringExpenseTemplate>>;
    fn get_by_id(&self, id: Uuid) -> Result<Option<RecurringExpenseTemplate>>;
    /// Stores a new template and returns it with its assigned id.
    fn add(&self, template: RecurringExpenseTemplate) -> Result<RecurringExpenseTemplate>;
    fn update_watermark(&self, id: Uuid, date: NaiveDate) -> Result<()>;
    fn set_end_date(&self, id: Uuid, date: NaiveDate) -> Result<()>;
}

/// Persistence for concrete expenses.
pub trait ExpenseStore: Send + Sync {
    /// Stores a new expense and returns it with its assigned id.
    fn add(&self, expense: Expense) -> Result<Expense>;
    /// Expenses dated within `[start, end]`, ordered by date.
    fn get_by_period(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Expense>>;
    fn get_all(&self) -> Result<Vec<Expense>>;
    fn update(&self, expense: &Expense) -> Result<()>;
    fn delete(&self, id: Uuid) -> Result<()>;
    fn get_by_id(&self, id: Uuid) -> Result<Option<Expense>>;
}
