//! Period totals, per-category totals, daily averages, and maxima.
//!
//! Every function only looks at records whose date falls inside the inclusive
//! range, so callers may pass a wider slice than the window. Sums use exact
//! decimal arithmetic.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{Amounted, BelongsToCategory, DateRange, Dated};

fn in_range<'a, T: Dated>(records: &'a [T], range: DateRange) -> impl Iterator<Item = &'a T> {
    records
        .iter()
        .filter(move |record| range.contains(record.date()))
}

pub fn total<T: Amounted + Dated>(records: &[T], range: DateRange) -> Decimal {
    in_range(records, range).map(|record| record.amount()).sum()
}

/// Sums amounts per category. Categories without records in the range are absent.
pub fn total_by_category<T>(records: &[T], range: DateRange) -> BTreeMap<Uuid, Decimal>
where
    T: Amounted + BelongsToCategory + Dated,
{
    let mut totals = BTreeMap::new();
    for record in in_range(records, range) {
        *totals.entry(record.category_id()).or_insert(Decimal::ZERO) += record.amount();
    }
    totals
}

/// Period total divided by the inclusive day count, unrounded.
pub fn daily_average<T: Amounted + Dated>(records: &[T], range: DateRange) -> Decimal {
    let days = range.days();
    if days <= 0 {
        return Decimal::ZERO;
    }
    total(records, range) / Decimal::from(days)
}

/// Largest record in the range. Ties keep the first one in iteration order.
pub fn max_expense<T: Amounted + Dated>(records: &[T], range: DateRange) -> Option<&T> {
    in_range(records, range).fold(None::<&T>, |best, record| match best {
        Some(current) if record.amount() <= current.amount() => Some(current),
        _ => Some(record),
    })
}
