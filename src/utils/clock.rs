//! Reference-date sources
//!
//! Ages are computed at query time relative to "today". The query engine
//! asks a [`Clock`] for that date instead of reading the system time itself.

use chrono::{Local, NaiveDate};

/// Source of the reference date used for age computation
pub trait Clock {
    /// The date ages are measured against
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the running machine
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
