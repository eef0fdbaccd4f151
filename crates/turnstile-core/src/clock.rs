//! Calendar-date clock abstraction.
//!
//! The daily grant compares dates, not timestamps, and every operation in a
//! process must agree on what "today" is. Components therefore take an
//! injected `Clock` instead of reading the wall clock, which also makes
//! day-rollover deterministic in tests.

use std::sync::atomic::{AtomicI32, Ordering};

use chrono::{Datelike, NaiveDate, Utc};

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    /// The current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Production clock backed by the system time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock whose date only moves when told to.
///
/// Used in tests to exercise day-rollover behavior; also usable by embedders
/// that pin "today" for a batch of work.
#[derive(Debug)]
pub struct ManualClock {
    // Days since the Common Era, so the date can move atomically.
    days: AtomicI32,
}

impl ManualClock {
    /// Create a clock fixed at the given date.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            days: AtomicI32::new(today.num_days_from_ce()),
        }
    }

    /// Pin the clock to a new date.
    pub fn set(&self, today: NaiveDate) {
        self.days.store(today.num_days_from_ce(), Ordering::SeqCst);
    }

    /// Move the clock forward (or back) by whole days.
    pub fn advance(&self, days: i32) {
        self.days.fetch_add(days, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        let days = self.days.load(Ordering::SeqCst);
        NaiveDate::from_num_days_from_ce_opt(days).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_holds_and_advances() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let clock = ManualClock::new(start);

        assert_eq!(clock.today(), start);
        assert_eq!(clock.today(), start);

        clock.advance(1);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());

        clock.set(start);
        assert_eq!(clock.today(), start);
    }

    #[test]
    fn system_clock_is_stable_within_a_call() {
        // Two immediate reads land on the same date outside a midnight race.
        let clock = SystemClock;
        let a = clock.today();
        let b = clock.today();
        assert!(b == a || b == a.succ_opt().unwrap());
    }
}
