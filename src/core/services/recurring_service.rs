//! Services that create, stop, and materialize recurring expenses.
//!
//! Generation walks a template's schedule from its watermark up to a cutoff,
//! storing one expense per date and persisting the watermark after each one.
//! Because the watermark moves with every stored occurrence, re-running with the
//! same cutoff creates nothing new, and an interrupted run resumes where it
//! stopped. Two generation passes over the same template must not overlap.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::time::Clock;
use crate::domain::{
    next_occurrence, Attachment, Expense, RecurrenceInterval, RecurringExpenseTemplate,
};
use crate::errors::{ExpenseError, Result};
use crate::storage::{ExpenseStore, TemplateStore};

/// Input for [`RecurringService::create`]. `start_date` defaults to today.
#[derive(Debug, Clone)]
pub struct NewRecurringExpense {
    pub name: String,
    pub amount: Decimal,
    pub category_id: Uuid,
    pub interval: RecurrenceInterval,
    pub start_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub attachment: Option<Attachment>,
}

impl NewRecurringExpense {
    pub fn new(
        name: impl Into<String>,
        amount: Decimal,
        category_id: Uuid,
        interval: RecurrenceInterval,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            category_id,
            interval,
            start_date: None,
            description: None,
            attachment: None,
        }
    }

    pub fn starting(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }
}

/// A template that could not be processed during a batch run.
#[derive(Debug)]
pub struct TemplateFailure {
    pub template_id: Option<Uuid>,
    pub name: String,
    pub error: ExpenseError,
}

/// Outcome of [`RecurringService::generate_missing_for_all`].
///
/// `generated` lists every stored occurrence in template order, including those
/// stored for a template before it failed.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub generated: Vec<Expense>,
    pub failures: Vec<TemplateFailure>,
}

impl GenerationReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct RecurringService;

impl RecurringService {
    /// Stores a new template. No occurrence is generated.
    pub fn create(
        templates: &dyn TemplateStore,
        clock: &dyn Clock,
        request: NewRecurringExpense,
    ) -> Result<RecurringExpenseTemplate> {
        let template = RecurringExpenseTemplate {
            description: request.description,
            attachment: request.attachment,
            ..RecurringExpenseTemplate::new(
                request.name,
                request.amount,
                request.category_id,
                request.interval,
                request.start_date.unwrap_or_else(|| clock.today()),
                clock.now(),
            )
        };
        template.validate()?;
        let stored = templates.add(template)?;
        tracing::info!(
            id = ?stored.id,
            name = %stored.name,
            interval = %stored.interval,
            start = %stored.start_date,
            "recurring expense created"
        );
        Ok(stored)
    }

    pub fn get(templates: &dyn TemplateStore, id: Uuid) -> Result<Option<RecurringExpenseTemplate>> {
        templates.get_by_id(id)
    }

    pub fn list(templates: &dyn TemplateStore) -> Result<Vec<RecurringExpenseTemplate>> {
        templates.get_all()
    }

    /// Every scheduled date from `start_date` through `min(through, end_date)`,
    /// regardless of what has been generated so far.
    pub fn schedule(template: &RecurringExpenseTemplate, through: NaiveDate) -> Vec<NaiveDate> {
        let limit = template.end_date.map_or(through, |end| end.min(through));
        let mut dates = Vec::new();
        let mut current = template.start_date;
        while current <= limit {
            dates.push(current);
            let next = next_occurrence(current, template.interval);
            if next <= current {
                break;
            }
            current = next;
        }
        dates
    }

    /// Stores every occurrence of `template` due on or before `cutoff` that has
    /// not been generated yet, and returns them in date order.
    ///
    /// Only the id of `template` is used; progress and end date are read back
    /// from the store, so an outdated copy is safe to pass.
    pub fn generate_missing(
        templates: &dyn TemplateStore,
        expenses: &dyn ExpenseStore,
        clock: &dyn Clock,
        template: &RecurringExpenseTemplate,
        cutoff: NaiveDate,
    ) -> Result<Vec<Expense>> {
        let mut generated = Vec::new();
        Self::generate_into(templates, expenses, clock, template, cutoff, &mut generated)?;
        Ok(generated)
    }

    /// Runs [`generate_missing`](Self::generate_missing) for every stored template.
    ///
    /// A template that fails is recorded in the report and skipped; the others
    /// are still processed. Only a failure to list the templates aborts the run.
    pub fn generate_missing_for_all(
        templates: &dyn TemplateStore,
        expenses: &dyn ExpenseStore,
        clock: &dyn Clock,
        cutoff: NaiveDate,
    ) -> Result<GenerationReport> {
        let mut report = GenerationReport::default();
        for template in templates.get_all()? {
            let outcome = Self::generate_into(
                templates,
                expenses,
                clock,
                &template,
                cutoff,
                &mut report.generated,
            );
            if let Err(error) = outcome {
                tracing::warn!(
                    id = ?template.id,
                    name = %template.name,
                    %error,
                    "skipping recurring expense after generation failure"
                );
                report.failures.push(TemplateFailure {
                    template_id: template.id,
                    name: template.name,
                    error,
                });
            }
        }
        tracing::info!(
            %cutoff,
            generated = report.generated.len(),
            failed = report.failures.len(),
            "recurring generation finished"
        );
        Ok(report)
    }

    /// Sets the end date of a template, defaulting to today.
    ///
    /// Occurrences already generated after the new end date are kept.
    pub fn stop(
        templates: &dyn TemplateStore,
        clock: &dyn Clock,
        id: Uuid,
        end_date: Option<NaiveDate>,
    ) -> Result<RecurringExpenseTemplate> {
        let template = templates
            .get_by_id(id)?
            .ok_or_else(|| ExpenseError::NotFound(format!("recurring expense {id}")))?;
        if template.is_stopped() {
            return Err(ExpenseError::AlreadyStopped(id));
        }
        let end = end_date.unwrap_or_else(|| clock.today());
        if end < template.start_date {
            return Err(ExpenseError::Validation(format!(
                "end date {end} precedes start date {}",
                template.start_date
            )));
        }
        templates.set_end_date(id, end)?;
        tracing::info!(%id, name = %template.name, %end, "recurring expense stopped");
        Ok(RecurringExpenseTemplate {
            end_date: Some(end),
            ..template
        })
    }

    fn generate_into(
        templates: &dyn TemplateStore,
        expenses: &dyn ExpenseStore,
        clock: &dyn Clock,
        template: &RecurringExpenseTemplate,
        cutoff: NaiveDate,
        out: &mut Vec<Expense>,
    ) -> Result<()> {
        let id = template.id.ok_or_else(|| {
            ExpenseError::Validation(format!(
                "recurring expense `{}` has not been stored yet",
                template.name
            ))
        })?;

        // The stored copy carries the current watermark and end date.
        let mut snapshot = templates
            .get_by_id(id)?
            .ok_or_else(|| ExpenseError::NotFound(format!("recurring expense {id}")))?;
        let mut count = 0usize;
        while let Some(date) = snapshot.next_due().filter(|date| *date <= cutoff) {
            if snapshot.last_generated_date.is_some_and(|last| date <= last) {
                break;
            }
            let occurrence = occurrence_of(&snapshot, id, date, clock);
            occurrence.validate()?;
            let stored = expenses.add(occurrence)?;
            templates.update_watermark(id, date)?;
            tracing::debug!(template = %id, %date, amount = %stored.amount, "occurrence generated");
            out.push(stored);
            snapshot = snapshot.with_watermark(date);
            count += 1;
        }

        if count > 0 {
            tracing::info!(
                template = %id,
                name = %template.name,
                count,
                watermark = ?snapshot.last_generated_date,
                "recurring expense backfilled"
            );
        }
        Ok(())
    }
}

fn occurrence_of(
    template: &RecurringExpenseTemplate,
    template_id: Uuid,
    date: NaiveDate,
    clock: &dyn Clock,
) -> Expense {
    Expense {
        description: template.description.clone(),
        is_recurring: true,
        recurring_expense_id: Some(template_id),
        attachment: template.attachment.clone(),
        ..Expense::new(date, template.amount, template.category_id, clock.now())
    }
}
