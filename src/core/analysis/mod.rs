//! Pure aggregation and comparison over expense records.

pub mod aggregate;
pub mod compare;

pub use aggregate::{daily_average, max_expense, total, total_by_category};
pub use compare::{compare, compare_totals_by_category};
