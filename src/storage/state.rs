use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Expense, RecurringExpenseTemplate};
use crate::errors::{ExpenseError, Result};

/// Everything a backend holds, in the shape written to disk by [`JsonStorage`](super::JsonStorage).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub templates: Vec<RecurringExpenseTemplate>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl StoreSnapshot {
    pub(crate) fn template(&self, id: Uuid) -> Option<&RecurringExpenseTemplate> {
        self.templates.iter().find(|t| t.id == Some(id))
    }

    fn template_mut(&mut self, id: Uuid) -> Result<&mut RecurringExpenseTemplate> {
        self.templates
            .iter_mut()
            .find(|t| t.id == Some(id))
            .ok_or_else(|| ExpenseError::NotFound(format!("recurring expense {id}")))
    }

    pub(crate) fn insert_template(
        &mut self,
        mut template: RecurringExpenseTemplate,
    ) -> RecurringExpenseTemplate {
        template.id = Some(Uuid::new_v4());
        self.templates.push(template.clone());
        template
    }

    pub(crate) fn set_watermark(&mut self, id: Uuid, date: NaiveDate) -> Result<()> {
        self.template_mut(id)?.last_generated_date = Some(date);
        Ok(())
    }

    pub(crate) fn set_end_date(&mut self, id: Uuid, date: NaiveDate) -> Result<()> {
        self.template_mut(id)?.end_date = Some(date);
        Ok(())
    }

    pub(crate) fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == Some(id))
    }

    pub(crate) fn insert_expense(&mut self, mut expense: Expense) -> Expense {
        expense.id = Some(Uuid::new_v4());
        self.expenses.push(expense.clone());
        expense
    }

    pub(crate) fn expenses_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<Expense> {
        let mut rows: Vec<Expense> = self
            .expenses
            .iter()
            .filter(|e| e.date >= start && e.date <= end)
            .cloned()
            .collect();
        rows.sort_by_key(|e| e.date);
        rows
    }

    pub(crate) fn replace_expense(&mut self, expense: &Expense) -> Result<()> {
        let id = expense
            .id
            .ok_or_else(|| ExpenseError::Validation("expense has no id".into()))?;
        let slot = self
            .expenses
            .iter_mut()
            .find(|e| e.id == Some(id))
            .ok_or_else(|| ExpenseError::NotFound(format!("expense {id}")))?;
        *slot = expense.clone();
        Ok(())
    }

    pub(crate) fn remove_expense(&mut self, id: Uuid) -> Result<()> {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != Some(id));
        if self.expenses.len() == before {
            return Err(ExpenseError::NotFound(format!("expense {id}")));
        }
        Ok(())
    }
}
