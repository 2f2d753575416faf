//! Time source used to stamp transactions

use chrono::{Local, NaiveDateTime, Timelike};
use std::{fmt::Debug, sync::Arc};

/// Something that knows the current local time
pub trait Clock: Debug + Send + Sync {
    /// current time with second resolution
    fn now(&self) -> NaiveDateTime;
}

/// Clock shared between every account of a bank
pub type SharedClock = Arc<dyn Clock>;

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Clock that always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl FixedClock {
    /// Build a fixed clock at `date` `hour:min:sec`. Invalid input falls back to unix epoch.
    pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        let instant = chrono::NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, min, sec))
            .unwrap_or_default();
        Self(instant)
    }

    /// Same as [`FixedClock::at`] but already shared
    pub fn shared(self) -> SharedClock {
        Arc::new(self)
    }
}

/// Shared [`SystemClock`]
pub fn system_clock() -> SharedClock {
    Arc::new(SystemClock)
}
