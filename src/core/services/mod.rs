pub mod analysis_service;
pub mod expense_service;
pub mod recurring_service;

pub use analysis_service::AnalysisService;
pub use expense_service::{ExpenseService, ExpenseUpdate, NewExpense};
pub use recurring_service::{
    GenerationReport, NewRecurringExpense, RecurringService, TemplateFailure,
};
