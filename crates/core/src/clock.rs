//! Source of "today" for the calendar.
//!
//! The windower needs today's date to flag the current week column. It is
//! passed in explicitly so tests and pinned deployments stay deterministic.

use chrono::{Local, NaiveDate};

/// Anything that can tell the calendar which day it is.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
