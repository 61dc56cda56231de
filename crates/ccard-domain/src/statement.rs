//! Statement periods and the billing-cycle cutoff rule.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use crate::{DomainError, Purchase};

/// Last day of the month billed on that same month's statement.
pub const CUTOFF_DAY: u32 = 11;

/// A (month, year) pair identifying one card statement. Months are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatementPeriod {
    year: i32,
    month: u32,
}

impl StatementPeriod {
    /// Years are limited to those a calendar date can carry.
    pub fn new(month: u32, year: i32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidMonth(month));
        }
        if !(NaiveDate::MIN.year()..=NaiveDate::MAX.year()).contains(&year) {
            return Err(DomainError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The calendar month of `date`, ignoring the cutoff.
    pub fn calendar(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Statement a purchase made on `date` is billed on.
    ///
    /// Days up to [`CUTOFF_DAY`] stay on the date's own month; later days roll
    /// to the following month, wrapping December into January of the next year.
    pub fn containing(date: NaiveDate) -> Self {
        let own = Self::calendar(date);
        if date.day() > CUTOFF_DAY {
            own.next()
        } else {
            own
        }
    }

    /// Inverse of [`StatementPeriod::containing`]: does a purchase on `date`
    /// belong to this statement?
    pub fn includes(&self, date: NaiveDate) -> bool {
        let own = Self::calendar(date);
        if date.day() <= CUTOFF_DAY {
            own == *self
        } else {
            own == self.previous()
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Moves `steps` months forward (positive) or backward (negative).
    pub fn shift(&self, steps: i32) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(steps);
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// First calendar day of the billing cycle closing on this statement.
    pub fn cycle_start(&self) -> Option<NaiveDate> {
        let previous = self.previous();
        NaiveDate::from_ymd_opt(previous.year, previous.month, CUTOFF_DAY + 1)
    }

    /// Last calendar day of the billing cycle closing on this statement.
    pub fn cycle_end(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, CUTOFF_DAY)
    }
}

impl fmt::Display for StatementPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

impl FromStr for StatementPeriod {
    type Err = DomainError;

    /// Accepts `MM/YYYY` or `YYYY-MM`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let raw = value.trim();
        let invalid = || DomainError::InvalidPeriod(raw.to_string());
        let (month, year) = if let Some((month, year)) = raw.split_once('/') {
            (month, year)
        } else if let Some((year, month)) = raw.split_once('-') {
            (month, year)
        } else {
            return Err(invalid());
        };
        let month: u32 = month.trim().parse().map_err(|_| invalid())?;
        let year: i32 = year.trim().parse().map_err(|_| invalid())?;
        Self::new(month, year).map_err(|_| invalid())
    }
}

/// The purchases billed on one statement. Always derived, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyStatement {
    pub period: StatementPeriod,
    pub purchases: Vec<Purchase>,
}

impl MonthlyStatement {
    pub fn new(period: StatementPeriod, purchases: Vec<Purchase>) -> Self {
        Self { period, purchases }
    }

    pub fn is_empty(&self) -> bool {
        self.purchases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.purchases.len()
    }
}
