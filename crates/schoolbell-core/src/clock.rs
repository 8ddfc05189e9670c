//! Wall-clock abstraction.
//!
//! The schedule model and countdown engine take explicit instants; only
//! hosts hold a clock. Tests build instants by hand instead of mocking time.

use chrono::NaiveDateTime;

/// Ambient wall-clock source.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}
