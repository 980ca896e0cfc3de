//! Expense domain models, persistence-friendly types, and calendar helpers.

pub mod category;
pub mod common;
pub mod expense;
pub mod period;
pub mod recurrence;
pub mod summary;
pub mod template;

pub use category::{category_names, Category};
pub use common::{Amounted, Attachment, BelongsToCategory, Dated};
pub use expense::{Expense, ExpenseAnalysis};
pub use period::DateRange;
pub use recurrence::{next_occurrence, next_occurrence_in_months, RecurrenceInterval};
pub use summary::{CategorySummary, OverallSummary, PeriodComparison, PeriodSummary};
pub use template::RecurringExpenseTemplate;
