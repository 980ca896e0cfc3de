mod common;

use common::{clock, ymd};
use expense_core::core::services::{
    ExpenseService, ExpenseUpdate, NewExpense, NewRecurringExpense, RecurringService,
};
use expense_core::domain::RecurrenceInterval;
use expense_core::errors::ExpenseError;
use expense_core::storage::{ExpenseStore, JsonStorage, TemplateStore};
use rust_decimal_macros::dec;
use tempfile::TempDir;
use uuid::Uuid;

fn open(temp: &TempDir) -> JsonStorage {
    JsonStorage::open(temp.path().join("expenses.json")).expect("open store")
}

#[test]
fn expenses_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let category = Uuid::new_v4();
    let id = {
        let store = open(&temp);
        let stored = ExpenseService::create(
            &store,
            &clock(),
            NewExpense {
                description: Some("lunch".into()),
                ..NewExpense::new(ymd(2024, 5, 2), dec!(12.40), category)
            },
        )
        .unwrap();
        stored.id.unwrap()
    };

    let store = open(&temp);
    let reloaded = ExpenseService::get(&store, id).unwrap();
    assert_eq!(reloaded.amount, dec!(12.40));
    assert_eq!(reloaded.description.as_deref(), Some("lunch"));
    assert!(!temp.path().join("expenses.json.tmp").exists());
}

#[test]
fn generation_resumes_from_persisted_watermark() {
    let temp = TempDir::new().unwrap();
    let template = {
        let store = open(&temp);
        let request = NewRecurringExpense::new(
            "Insurance",
            dec!(80),
            Uuid::new_v4(),
            RecurrenceInterval::EverySixMonths,
        )
        .starting(ymd(2023, 8, 31));
        let template = RecurringService::create(&store, &clock(), request).unwrap();
        RecurringService::generate_missing(&store, &store, &clock(), &template, ymd(2024, 1, 1))
            .unwrap();
        template
    };

    let store = open(&temp);
    let current = TemplateStore::get_by_id(&store, template.id.unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(current.last_generated_date, Some(ymd(2023, 8, 31)));

    let generated =
        RecurringService::generate_missing(&store, &store, &clock(), &current, ymd(2024, 12, 31))
            .unwrap();
    let dates: Vec<_> = generated.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![ymd(2024, 2, 29), ymd(2024, 8, 29)]);

    // A second pass after reopening stores nothing new.
    let store = open(&temp);
    let report =
        RecurringService::generate_missing_for_all(&store, &store, &clock(), ymd(2024, 12, 31))
            .unwrap();
    assert!(report.generated.is_empty());
    assert_eq!(ExpenseStore::get_all(&store).unwrap().len(), 3);
}

#[test]
fn update_and_delete_are_persisted() {
    let temp = TempDir::new().unwrap();
    let store = open(&temp);
    let category = Uuid::new_v4();
    let add = |day, amount| {
        ExpenseService::create(&store, &clock(), NewExpense::new(ymd(2024, 1, day), amount, category))
            .unwrap()
    };
    let kept = add(3, dec!(5));
    let dropped = add(4, dec!(7));

    ExpenseService::update(
        &store,
        kept.id.unwrap(),
        ExpenseUpdate {
            date: ymd(2024, 1, 5),
            amount: dec!(6),
            category_id: category,
            description: None,
            attachment: None,
        },
    )
    .unwrap();
    ExpenseService::delete(&store, dropped.id.unwrap()).unwrap();

    let reopened = open(&temp);
    let all = ExpenseService::list_all(&reopened).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].date, ymd(2024, 1, 5));
    assert_eq!(all[0].amount, dec!(6));
    assert!(matches!(
        ExpenseService::delete(&reopened, dropped.id.unwrap()),
        Err(ExpenseError::NotFound(_))
    ));
}

#[test]
fn corrupt_file_is_a_storage_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("expenses.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(JsonStorage::open(&path), Err(ExpenseError::Storage(_))));
}
