//! Period summaries comparing a date range with the window just before it.

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::Config;
use crate::core::analysis::{
    compare, compare_totals_by_category, daily_average, max_expense, total, total_by_category,
};
use crate::domain::{CategorySummary, DateRange, Expense, OverallSummary, PeriodSummary};
use crate::errors::Result;
use crate::storage::ExpenseStore;

pub struct AnalysisService;

impl AnalysisService {
    /// Builds the summary for `range`.
    ///
    /// Returns `None` when nothing was spent in `range`, even if the previous
    /// window had expenses. With `compare_previous` off, every previous-period
    /// and delta field is left empty.
    pub fn summarize(
        expenses: &dyn ExpenseStore,
        range: DateRange,
        category_names: &HashMap<Uuid, String>,
        compare_previous: bool,
    ) -> Result<Option<PeriodSummary>> {
        let previous_range = range.previous()?;
        let current = expenses.get_by_period(range.start(), range.end())?;
        let previous = expenses.get_by_period(previous_range.start(), previous_range.end())?;

        let totals = compare(total(&current, range), total(&previous, previous_range));
        if totals.current.is_zero() {
            tracing::debug!(start = %range.start(), end = %range.end(), "no expenses in period");
            return Ok(None);
        }
        let averages = compare(
            daily_average(&current, range),
            daily_average(&previous, previous_range),
        );
        let max_current = largest_amount(&current, range);
        let max_previous = largest_amount(&previous, previous_range);

        let keep = |value: Option<Decimal>| if compare_previous { value } else { None };

        let overall = OverallSummary {
            total_amount: totals.current,
            daily_average: averages.current,
            max_single_expense: max_current,
            previous_total_amount: keep(Some(totals.previous)),
            previous_daily_average: keep(Some(averages.previous)),
            previous_max_single_expense: keep(Some(max_previous)),
            delta_percent: keep(totals.delta_percentage),
            daily_average_delta_percent: keep(averages.delta_percentage),
        };

        let per_category = compare_totals_by_category(
            &total_by_category(&current, range),
            &total_by_category(&previous, previous_range),
        );
        let mut by_category: Vec<CategorySummary> = per_category
            .into_iter()
            .map(|(category_id, comparison)| CategorySummary {
                category_id,
                category_name: category_names.get(&category_id).cloned(),
                total_amount: comparison.current,
                previous_total_amount: keep(Some(comparison.previous)),
                delta_percent: keep(comparison.delta_percentage),
            })
            .collect();
        by_category.sort_by(|a, b| {
            b.total_amount
                .cmp(&a.total_amount)
                .then_with(|| a.category_id.cmp(&b.category_id))
        });

        tracing::debug!(
            start = %range.start(),
            end = %range.end(),
            total = %overall.total_amount,
            categories = by_category.len(),
            "period summarized"
        );

        Ok(Some(PeriodSummary {
            period: range,
            previous_period: compare_previous.then_some(previous_range),
            overall,
            by_category,
        }))
    }

    /// [`summarize`](Self::summarize) with the comparison toggle taken from `config`.
    pub fn summarize_with_config(
        expenses: &dyn ExpenseStore,
        range: DateRange,
        category_names: &HashMap<Uuid, String>,
        config: &Config,
    ) -> Result<Option<PeriodSummary>> {
        Self::summarize(expenses, range, category_names, config.compare_previous_period)
    }

    /// [`summarize`](Self::summarize) over one calendar month.
    pub fn summarize_month(
        expenses: &dyn ExpenseStore,
        year: i32,
        month: u32,
        category_names: &HashMap<Uuid, String>,
        compare_previous: bool,
    ) -> Result<Option<PeriodSummary>> {
        let range = DateRange::month(year, month)?;
        Self::summarize(expenses, range, category_names, compare_previous)
    }
}

fn largest_amount(expenses: &[Expense], range: DateRange) -> Decimal {
    max_expense(expenses, range).map_or(Decimal::ZERO, |expense| expense.amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn record(store: &MemoryStorage, date: NaiveDate, amount: Decimal, category: Uuid) {
        ExpenseStore::add(store, Expense::new(date, amount, category, Utc::now())).unwrap();
    }

    #[test]
    fn empty_current_period_yields_no_summary() {
        let store = MemoryStorage::new();
        let category = Uuid::new_v4();
        record(&store, ymd(2024, 2, 10), dec!(80), category);
        let names = HashMap::from([(category, "Food".to_string())]);

        let range = DateRange::new(ymd(2024, 3, 1), ymd(2024, 3, 10)).unwrap();
        assert!(AnalysisService::summarize(&store, range, &names, true)
            .unwrap()
            .is_none());
    }

    #[test]
    fn config_toggle_controls_comparison() {
        let store = MemoryStorage::new();
        let category = Uuid::new_v4();
        record(&store, ymd(2024, 3, 5), dec!(30), category);
        record(&store, ymd(2024, 2, 5), dec!(20), category);
        let range = DateRange::month(2024, 3).unwrap();

        let enabled = Config::default();
        let summary = AnalysisService::summarize_with_config(&store, range, &HashMap::new(), &enabled)
            .unwrap()
            .unwrap();
        assert_eq!(summary.overall.previous_total_amount, Some(dec!(20)));
        assert_eq!(summary.overall.delta_percent, Some(dec!(50)));

        let disabled = Config {
            compare_previous_period: false,
            ..Config::default()
        };
        let summary = AnalysisService::summarize_with_config(&store, range, &HashMap::new(), &disabled)
            .unwrap()
            .unwrap();
        assert_eq!(summary.previous_period, None);
        assert_eq!(summary.overall.delta_percent, None);
    }

    #[test]
    fn range_at_calendar_floor_is_rejected() {
        let store = MemoryStorage::new();
        let range = DateRange::new(NaiveDate::MIN, NaiveDate::MIN).unwrap();
        assert!(matches!(
            AnalysisService::summarize(&store, range, &HashMap::new(), true),
            Err(crate::errors::ExpenseError::Validation(_))
        ));
    }

    #[test]
    fn disabled_comparison_clears_previous_fields() {
        let store = MemoryStorage::new();
        let category = Uuid::new_v4();
        record(&store, ymd(2024, 3, 5), dec!(20), category);
        record(&store, ymd(2024, 2, 5), dec!(10), category);

        let range = DateRange::month(2024, 3).unwrap();
        let summary = AnalysisService::summarize(&store, range, &HashMap::new(), false)
            .unwrap()
            .unwrap();
        assert_eq!(summary.previous_period, None);
        assert_eq!(summary.overall.total_amount, dec!(20));
        assert_eq!(summary.overall.previous_total_amount, None);
        assert_eq!(summary.overall.previous_daily_average, None);
        assert_eq!(summary.overall.previous_max_single_expense, None);
        assert_eq!(summary.overall.delta_percent, None);
        assert_eq!(summary.by_category.len(), 1);
        assert_eq!(summary.by_category[0].previous_total_amount, None);
        assert_eq!(summary.by_category[0].delta_percent, None);
        assert_eq!(summary.by_category[0].category_name, None);
    }
}
