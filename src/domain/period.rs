use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::recurrence::days_in_month;
use crate::errors::{ExpenseError, Result};

/// Inclusive `[start, end]` range of calendar dates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = ExpenseError;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ExpenseError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The whole calendar month `month` of `year`.
    pub fn month(year: i32, month: u32) -> Result<Self> {
        let invalid = || ExpenseError::Validation(format!("invalid month {year}-{month:02}"));
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
            .ok_or_else(invalid)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The window of equal length that ends the day before this one starts.
    ///
    /// Fails when that window would reach past the earliest representable date.
    pub fn previous(&self) -> Result<Self> {
        let underflow = || {
            ExpenseError::Validation(format!(
                "no {}-day window precedes {}",
                self.days(),
                self.start
            ))
        };
        let end = self
            .start
            .checked_sub_signed(Duration::days(1))
            .ok_or_else(underflow)?;
        let start = end
            .checked_sub_signed(Duration::days(self.days() - 1))
            .ok_or_else(underflow)?;
        Ok(Self { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn rejects_inverted_range() {
        let err = DateRange::new(ymd(2024, 2, 2), ymd(2024, 2, 1)).unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidRange { .. }));
        assert!(DateRange::new(ymd(2024, 2, 1), ymd(2024, 2, 1)).is_ok());
    }

    #[test]
    fn previous_window_has_equal_length() {
        let march = DateRange::month(2024, 3).unwrap();
        let previous = march.previous().unwrap();
        assert_eq!(previous.end(), ymd(2024, 2, 29));
        assert_eq!(previous.start(), ymd(2024, 1, 30));
        assert_eq!(previous.days(), march.days());

        let single = DateRange::new(ymd(2024, 1, 1), ymd(2024, 1, 1)).unwrap();
        assert_eq!(
            single.previous().unwrap(),
            DateRange::new(ymd(2023, 12, 31), ymd(2023, 12, 31)).unwrap()
        );
    }

    #[test]
    fn previous_window_before_earliest_date_is_an_error() {
        let floor = DateRange::new(NaiveDate::MIN, NaiveDate::MIN).unwrap();
        assert!(matches!(floor.previous(), Err(ExpenseError::Validation(_))));

        let near_floor = DateRange::new(
            NaiveDate::MIN + Duration::days(1),
            NaiveDate::MIN + Duration::days(2),
        )
        .unwrap();
        assert!(near_floor.previous().is_err());

        let fits = DateRange::new(NaiveDate::MIN + Duration::days(1), NaiveDate::MIN + Duration::days(1))
            .unwrap();
        assert_eq!(fits.previous().unwrap().start(), NaiveDate::MIN);
    }

    #[test]
    fn month_covers_whole_calendar_month() {
        let feb = DateRange::month(2023, 2).unwrap();
        assert_eq!(feb.start(), ymd(2023, 2, 1));
        assert_eq!(feb.end(), ymd(2023, 2, 28));
        assert_eq!(feb.days(), 28);
        assert!(feb.contains(ymd(2023, 2, 28)));
        assert!(!feb.contains(ymd(2023, 3, 1)));
        assert!(DateRange::month(2023, 13).is_err());
    }
}
