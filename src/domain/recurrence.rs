//! Calendar arithmetic for recurring expenses.
//!
//! Every supported interval is a whole number of months. Advancing a date keeps
//! the day-of-month when the target month has it and clamps to the month's last
//! day otherwise, so `Jan 31 + 1 month` lands on Feb 28 or Feb 29.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{ExpenseError, Result};

/// Enumerates the schedules a recurring expense can follow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "u32", into = "u32")]
pub enum RecurrenceInterval {
    Monthly,
    EveryTwoMonths,
    EveryThreeMonths,
    EveryFourMonths,
    EverySixMonths,
    Yearly,
}

impl RecurrenceInterval {
    pub const ALL: [RecurrenceInterval; 6] = [
        RecurrenceInterval::Monthly,
        RecurrenceInterval::EveryTwoMonths,
        RecurrenceInterval::EveryThreeMonths,
        RecurrenceInterval::EveryFourMonths,
        RecurrenceInterval::EverySixMonths,
        RecurrenceInterval::Yearly,
    ];

    /// Number of calendar months between two occurrences.
    pub fn months(self) -> u32 {
        match self {
            RecurrenceInterval::Monthly => 1,
            RecurrenceInterval::EveryTwoMonths => 2,
            RecurrenceInterval::EveryThreeMonths => 3,
            RecurrenceInterval::EveryFourMonths => 4,
            RecurrenceInterval::EverySixMonths => 6,
            RecurrenceInterval::Yearly => 12,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecurrenceInterval::Monthly => "Monthly",
            RecurrenceInterval::EveryTwoMonths => "Bimonthly",
            RecurrenceInterval::EveryThreeMonths => "Quarterly",
            RecurrenceInterval::EveryFourMonths => "Every 4 months",
            RecurrenceInterval::EverySixMonths => "Semiannual",
            RecurrenceInterval::Yearly => "Yearly",
        }
    }
}

impl TryFrom<u32> for RecurrenceInterval {
    type Error = ExpenseError;

    fn try_from(months: u32) -> Result<Self> {
        match months {
            1 => Ok(RecurrenceInterval::Monthly),
            2 => Ok(RecurrenceInterval::EveryTwoMonths),
            3 => Ok(RecurrenceInterval::EveryThreeMonths),
            4 => Ok(RecurrenceInterval::EveryFourMonths),
            6 => Ok(RecurrenceInterval::EverySixMonths),
            12 => Ok(RecurrenceInterval::Yearly),
            other => Err(ExpenseError::UnsupportedInterval(other)),
        }
    }
}

impl From<RecurrenceInterval> for u32 {
    fn from(interval: RecurrenceInterval) -> Self {
        interval.months()
    }
}

impl fmt::Display for RecurrenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns the occurrence that follows `date` on the given schedule.
pub fn next_occurrence(date: NaiveDate, interval: RecurrenceInterval) -> NaiveDate {
    match interval {
        RecurrenceInterval::Yearly => shift_year(date, 1),
        other => shift_month(date, other.months()),
    }
}

/// Same as [`next_occurrence`] for a raw month count read from outside the crate.
pub fn next_occurrence_in_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    let interval = RecurrenceInterval::try_from(months)?;
    Ok(next_occurrence(date, interval))
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    }
}

fn shift_month(date: NaiveDate, months: u32) -> NaiveDate {
    let index = date.month0() + months;
    let year = date.year() + (index / 12) as i32;
    let month = index % 12 + 1;
    clamped(year, month, date.day())
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    clamped(date.year() + years, date.month(), date.day())
}

fn clamped(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.min(days_in_month(year, month));
    // year/month/day are in range: month is 1..=12 and day is clamped above.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MAX)
}
