//! Derived reporting types. None of these are persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::period::DateRange;

/// One figure measured over a current and a previous period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodComparison {
    pub current: Decimal,
    pub previous: Decimal,
    pub delta_absolute: Decimal,
    /// `None` whenever `previous` is zero.
    pub delta_percentage: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverallSummary {
    pub total_amount: Decimal,
    pub daily_average: Decimal,
    pub max_single_expense: Decimal,
    pub previous_total_amount: Option<Decimal>,
    pub previous_daily_average: Option<Decimal>,
    pub previous_max_single_expense: Option<Decimal>,
    pub delta_percent: Option<Decimal>,
    pub daily_average_delta_percent: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySummary {
    pub category_id: Uuid,
    pub category_name: Option<String>,
    pub total_amount: Decimal,
    pub previous_total_amount: Option<Decimal>,
    pub delta_percent: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodSummary {
    pub period: DateRange,
    pub previous_period: Option<DateRange>,
    pub overall: OverallSummary,
    pub by_category: Vec<CategorySummary>,
}

impl PeriodSummary {
    pub fn category(&self, category_id: Uuid) -> Option<&CategorySummary> {
        self.by_category
            .iter()
            .find(|row| row.category_id == category_id)
    }
}
