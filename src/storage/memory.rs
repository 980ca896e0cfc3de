use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Expense, RecurringExpenseTemplate};
use crate::errors::{ExpenseError, Result};

use super::{ExpenseStore, StoreSnapshot, TemplateStore};

/// In-process store implementing both store traits. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: RwLock<StoreSnapshot>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreSnapshot>> {
        self.state
            .read()
            .map_err(|_| ExpenseError::Storage("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreSnapshot>> {
        self.state
            .write()
            .map_err(|_| ExpenseError::Storage("memory store lock poisoned".into()))
    }
}

impl TemplateStore for MemoryStorage {
    fn get_all(&self) -> Result<Vec<RecurringExpenseTemplate>> {
        Ok(self.read()?.templates.clone())
    }

    fn get_by_id(&self, id: Uuid) -> Result<Option<RecurringExpenseTemplate>> {
        Ok(self.read()?.template(id).cloned())
    }

    fn add(&self, template: RecurringExpenseTemplate) -> Result<RecurringExpenseTemplate> {
        Ok(self.write()?.insert_template(template))
    }

    fn update_watermark(&self, id: Uuid, date: NaiveDate) -> Result<()> {
        self.write()?.set_watermark(id, date)
    }

    fn set_end_date(&self, id: Uuid, date: NaiveDate) -> Result<()> {
        self.write()?.set_end_date(id, date)
    }
}

impl ExpenseStore for MemoryStorage {
    fn add(&self, expense: Expense) -> Result<Expense> {
        Ok(self.write()?.insert_expense(expense))
    }

    fn get_by_period(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Expense>> {
        Ok(self.read()?.expenses_between(start, end))
    }

    fn get_all(&self) -> Result<Vec<Expense>> {
        Ok(self.read()?.expenses.clone())
    }

    fn update(&self, expense: &Expense) -> Result<()> {
        self.write()?.replace_expense(expense)
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        self.write()?.remove_expense(id)
    }

    fn get_by_id(&self, id: Uuid) -> Result<Option<Expense>> {
        Ok(self.read()?.expense(id).cloned())
    }
}
