//! Period-over-period deltas.
//!
//! A zero baseline makes a percentage change undefined, so the percentage is
//! `None` in that case rather than zero or infinity.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::PeriodComparison;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

pub fn compare(current: Decimal, previous: Decimal) -> PeriodComparison {
    let delta_absolute = current - previous;
    let delta_percentage = if previous.is_zero() {
        None
    } else {
        Some(delta_absolute / previous * HUNDRED)
    };
    PeriodComparison {
        current,
        previous,
        delta_absolute,
        delta_percentage,
    }
}

/// Compares every category seen in either period; a missing side counts as zero.
pub fn compare_totals_by_category(
    current: &BTreeMap<Uuid, Decimal>,
    previous: &BTreeMap<Uuid, Decimal>,
) -> BTreeMap<Uuid, PeriodComparison> {
    let categories: BTreeSet<Uuid> = current.keys().chain(previous.keys()).copied().collect();
    categories
        .into_iter()
        .map(|category_id| {
            let now = current.get(&category_id).copied().unwrap_or(Decimal::ZERO);
            let before = previous.get(&category_id).copied().unwrap_or(Decimal::ZERO);
            (category_id, compare(now, before))
        })
        .collect()
}
