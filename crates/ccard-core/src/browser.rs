//! Navigation state over the sliding window of statement months.

use ccard_domain::StatementPeriod;
use chrono::NaiveDate;

use crate::{
    statement_service::{StatementPair, StatementService},
    time::Clock,
    CoreError, PurchaseBook,
};

pub const DEFAULT_WINDOW_MONTHS: usize = 12;

/// The `count` calendar months ending at `today`'s month, most recent first.
pub fn available_periods(today: NaiveDate, count: usize) -> Vec<StatementPeriod> {
    let latest = StatementPeriod::calendar(today);
    (0..count.max(1))
        .map(|offset| latest.shift(-(offset as i32)))
        .collect()
}

/// Holds the selected statement month and derives the statements to show.
///
/// Constructed once at startup and passed to whoever navigates or renders;
/// statements are recomputed from the purchase book on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementBrowser {
    window: Vec<StatementPeriod>,
    selected: usize,
}

impl StatementBrowser {
    /// Selects `today`'s calendar month inside a window of `count` months.
    pub fn new(today: NaiveDate, count: usize) -> Self {
        Self {
            window: available_periods(today, count),
            selected: 0,
        }
    }

    pub fn from_clock(clock: &dyn Clock, count: usize) -> Self {
        Self::new(clock.today(), count)
    }

    /// Months reachable from here, most recent first.
    pub fn window(&self) -> &[StatementPeriod] {
        &self.window
    }

    pub fn selected(&self) -> StatementPeriod {
        self.window[self.selected]
    }

    /// The statement shown alongside the selected one.
    pub fn following(&self) -> StatementPeriod {
        self.selected().next()
    }

    pub fn select(&mut self, period: StatementPeriod) -> Result<(), CoreError> {
        let index = self
            .window
            .iter()
            .position(|candidate| *candidate == period)
            .ok_or(CoreError::PeriodOutOfRange(period))?;
        self.selected = index;
        Ok(())
    }

    pub fn can_select_previous(&self) -> bool {
        self.selected + 1 < self.window.len()
    }

    pub fn can_select_next(&self) -> bool {
        self.selected > 0
    }

    /// Moves one month back. Returns `false` at the oldest month.
    pub fn select_previous(&mut self) -> bool {
        if !self.can_select_previous() {
            return false;
        }
        self.selected += 1;
        true
    }

    /// Moves one month forward. Returns `false` at the current month.
    pub fn select_next(&mut self) -> bool {
        if !self.can_select_next() {
            return false;
        }
        self.selected -= 1;
        true
    }

    pub fn statements(&self, book: &PurchaseBook) -> Result<StatementPair, CoreError> {
        Ok(StatementService::current_and_next(
            &book.list()?,
            self.selected(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;

    fn period(month: u32, year: i32) -> StatementPeriod {
        StatementPeriod::new(month, year).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    #[test]
    fn window_ends_at_current_calendar_month() {
        let periods = available_periods(today(), 12);
        assert_eq!(periods.len(), 12);
        assert_eq!(periods[0], period(3, 2024));
        assert_eq!(periods[2], period(1, 2024));
        assert_eq!(periods[3], period(12, 2023));
        assert_eq!(periods[11], period(4, 2023));
    }

    #[test]
    fn zero_count_still_offers_current_month() {
        assert_eq!(available_periods(today(), 0), vec![period(3, 2024)]);
    }

    #[test]
    fn navigation_is_bounded_by_window() {
        let mut browser = StatementBrowser::from_clock(&FixedClock::new(today()), 3);
        assert_eq!(browser.selected(), period(3, 2024));
        assert!(!browser.select_next());

        assert!(browser.select_previous());
        assert!(browser.select_previous());
        assert_eq!(browser.selected(), period(1, 2024));
        assert!(!browser.select_previous());

        assert!(browser.select_next());
        assert_eq!(browser.selected(), period(2, 2024));
        assert_eq!(browser.following(), period(3, 2024));
    }

    #[test]
    fn select_rejects_months_outside_window() {
        let mut browser = StatementBrowser::new(today(), 12);
        assert!(browser.select(period(6, 2023)).is_ok());
        assert_eq!(browser.selected(), period(6, 2023));
        let err = browser.select(period(4, 2024)).unwrap_err();
        assert!(matches!(err, CoreError::PeriodOutOfRange(p) if p == period(4, 2024)));
        assert_eq!(browser.selected(), period(6, 2023));
    }
}
