//! Business logic: recurrence generation, aggregation, and reporting services.

pub mod analysis;
pub mod services;
pub mod time;

pub use time::{Clock, FixedClock, SystemClock};
