//! Injected wall clock
//!
//! Time-slot filtering depends on "now", and backend timestamps depend on
//! the local UTC offset. Flows take a `&dyn Clock` so tests can pin both.

use chrono::{FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use std::cell::Cell;

pub trait Clock {
    /// Local wall time
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// UTC offset in effect at the local wall time `at`
    fn offset_at(&self, at: NaiveDateTime) -> FixedOffset;
}

/// Local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn offset_at(&self, at: NaiveDateTime) -> FixedOffset {
        // DST gaps have no local mapping; read the offset as if `at` were UTC
        Local
            .offset_from_local_datetime(&at)
            .earliest()
            .unwrap_or_else(|| Local.offset_from_utc_datetime(&at))
    }
}

/// Settable clock for tests and replay
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
    offset: FixedOffset,
}

impl FixedClock {
    /// Clock pinned at `now`, in UTC
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
            offset: Utc.fix(),
        }
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Clock at `hour:minute` on `date`; out-of-range times clamp to midnight
    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> Self {
        let time = chrono::NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default();
        Self::new(date.and_time(time))
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }

    fn offset_at(&self, _at: NaiveDateTime) -> FixedOffset {
        self.offset
    }
}
