//! Wall-clock boundary and day keys.
//!
//! State stores the current day as a string key. The canonical format is
//! `Mon Oct 19 2026`; ISO dates are accepted when reading.

use std::cell::Cell;

use chrono::{Local, NaiveDate};

/// Canonical day key format.
pub const DAY_KEY_FORMAT: &str = "%a %b %d %Y";

/// Source of "today".
pub trait Clock {
    fn today(&self) -> NaiveDate;

    /// Today's day key.
    fn today_key(&self) -> String {
        day_key(self.today())
    }
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a settable date.
#[derive(Debug, Clone)]
pub struct FixedClock {
    date: Cell<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Cell::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        self.date.set(date);
    }

    /// Move the clock forward by whole days.
    pub fn advance_days(&self, days: u64) {
        let next = self
            .date
            .get()
            .checked_add_days(chrono::Days::new(days))
            .unwrap_or(NaiveDate::MAX);
        self.date.set(next);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Format a date as a day key.
pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_KEY_FORMAT).to_string()
}

/// Parse a day key. Accepts the canonical format and `YYYY-MM-DD`.
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    let key = key.trim();
    NaiveDate::parse_from_str(key, DAY_KEY_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(key, "%Y-%m-%d"))
        .ok()
}

/// Long human form used in the board footer, e.g. `Monday, October 19, 2026`.
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
