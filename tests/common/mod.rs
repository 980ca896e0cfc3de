#![allow(dead_code)]

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use expense_core::core::FixedClock;
use expense_core::domain::Expense;
use expense_core::storage::{ExpenseStore, MemoryStorage};
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn clock() -> FixedClock {
    FixedClock::on(ymd(2024, 6, 15))
}

/// Stores a manual expense directly through the store trait.
pub fn record(store: &dyn ExpenseStore, date: NaiveDate, amount: Decimal, category: Uuid) -> Expense {
    store
        .add(Expense::new(date, amount, category, Utc::now()))
        .expect("store expense")
}

pub fn names(entries: &[(Uuid, &str)]) -> HashMap<Uuid, String> {
    entries
        .iter()
        .map(|(id, name)| (*id, name.to_string()))
        .collect()
}

pub fn memory() -> MemoryStorage {
    MemoryStorage::new()
}
