#![doc(test(attr(deny(warnings))))]

//! Expense Core tracks categorized personal expenses, materializes recurring
//! expenses on a fixed monthly or yearly schedule, and compares spending between
//! a period and the one before it.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}

/// Like [`init`], but filters logs with [`Config::log_filter`](config::Config::log_filter).
pub fn init_with_config(config: &config::Config) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing_with(&config.log_filter);
        tracing::info!(filter = %config.log_filter, "Expense Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }

    #[test]
    fn init_with_config_after_init_is_a_no_op() {
        super::init();
        super::init_with_config(&crate::config::Config {
            log_filter: "expense_core=debug".into(),
            ..Default::default()
        });
    }
}
