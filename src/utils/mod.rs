use std::sync::Once;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "expense_core=info";

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_DIRECTIVE);
}

/// Initializes tracing from `RUST_LOG` plus the given directives, e.g.
/// [`Config::log_filter`](crate::config::Config::log_filter).
///
/// Only the first call has an effect. Directives that fail to parse are
/// skipped and reported once the subscriber is up.
pub fn init_tracing_with(directives: &str) {
    TRACING_INIT.call_once(|| {
        let (filter, rejected) = build_filter(EnvFilter::from_default_env(), directives);
        // Another subscriber may already be installed by the host application.
        let _ = fmt().with_env_filter(filter).try_init();
        for directive in rejected {
            tracing::warn!(%directive, "ignoring invalid log directive");
        }
    });
}

/// Adds each comma-separated directive to `filter`, returning the ones that
/// did not parse.
pub(crate) fn build_filter(mut filter: EnvFilter, directives: &str) -> (EnvFilter, Vec<String>) {
    let mut rejected = Vec::new();
    for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        match directive.parse::<Directive>() {
            Ok(parsed) => filter = filter.add_directive(parsed),
            Err(_) => rejected.push(directive.to_string()),
        }
    }
    (filter, rejected)
}
