//! Calendar clock used to judge whether a daily rate is current.

use chrono::{Local, NaiveDate};
use std::sync::Arc;

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    /// Today's date in the clock's time zone.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    /// Create a clock that always reports `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Shared clock handle.
pub type SharedClock = Arc<dyn Clock>;

/// Default shared clock.
pub fn system_clock() -> SharedClock {
    Arc::new(SystemClock)
}
