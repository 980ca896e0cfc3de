//! File-backed store that keeps templates and expenses in one JSON document.
//!
//! Every mutation is applied to a copy of the in-memory snapshot, written to a
//! temporary sibling file, and renamed over the store file. Only after the rename
//! succeeds does the in-memory snapshot change, so a failed write leaves both the
//! file and the process view untouched.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard},
};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Expense, RecurringExpenseTemplate};
use crate::errors::{ExpenseError, Result};

use super::{ExpenseStore, StoreSnapshot, TemplateStore};

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug)]
pub struct JsonStorage {
    path: PathBuf,
    state: RwLock<StoreSnapshot>,
}

impl JsonStorage {
    /// Opens the store at `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let snapshot = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            StoreSnapshot::default()
        };
        tracing::debug!(
            path = %path.display(),
            templates = snapshot.templates.len(),
            expenses = snapshot.expenses.len(),
            "opened json store"
        );
        Ok(Self {
            path,
            state: RwLock::new(snapshot),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreSnapshot>> {
        self.state
            .read()
            .map_err(|_| ExpenseError::Storage("json store lock poisoned".into()))
    }

    fn mutate<T>(&self, apply: impl FnOnce(&mut StoreSnapshot) -> Result<T>) -> Result<T> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| ExpenseError::Storage("json store lock poisoned".into()))?;
        let mut next = guard.clone();
        let value = apply(&mut next)?;
        save_snapshot(&self.path, &next)?;
        *guard = next;
        Ok(value)
    }
}

impl TemplateStore for JsonStorage {
    fn get_all(&self) -> Result<Vec<RecurringExpenseTemplate>> {
        Ok(self.read()?.templates.clone())
    }

    fn get_by_id(&self, id: Uuid) -> Result<Option<RecurringExpenseTemplate>> {
        Ok(self.read()?.template(id).cloned())
    }

    fn add(&self, template: RecurringExpenseTemplate) -> Result<RecurringExpenseTemplate> {
        self.mutate(|state| Ok(state.insert_template(template)))
    }

    fn update_watermark(&self, id: Uuid, date: NaiveDate) -> Result<()> {
        self.mutate(|state| state.set_watermark(id, date))
    }

    fn set_end_date(&self, id: Uuid, date: NaiveDate) -> Result<()> {
        self.mutate(|state| state.set_end_date(id, date))
    }
}

impl ExpenseStore for JsonStorage {
    fn add(&self, expense: Expense) -> Result<Expense> {
        self.mutate(|state| Ok(state.insert_expense(expense)))
    }

    fn get_by_period(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Expense>> {
        Ok(self.read()?.expenses_between(start, end))
    }

    fn get_all(&self) -> Result<Vec<Expense>> {
        Ok(self.read()?.expenses.clone())
    }

    fn update(&self, expense: &Expense) -> Result<()> {
        self.mutate(|state| state.replace_expense(expense))
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        self.mutate(|state| state.remove_expense(id))
    }

    fn get_by_id(&self, id: Uuid) -> Result<Option<Expense>> {
        Ok(self.read()?.expense(id).cloned())
    }
}

fn save_snapshot(path: &Path, snapshot: &StoreSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("/data/store.json")),
            PathBuf::from("/data/store.json.tmp")
        );
        assert_eq!(tmp_path(Path::new("/data/store")), PathBuf::from("/data/store.tmp"));
    }
}
