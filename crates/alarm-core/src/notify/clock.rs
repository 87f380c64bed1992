//! Wall-clock sources for notification timers

use chrono::{DateTime, Local, TimeDelta};
use tokio::time::Instant;

/// Source of the current local time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// The system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Local time advanced by tokio's monotonic timer from a fixed origin
///
/// Follows `tokio::time::pause` and `advance`, and ignores wall-clock
/// adjustments made after the origin was taken.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: DateTime<Local>,
    started: Instant,
}

impl MonotonicClock {
    pub fn starting_at(origin: DateTime<Local>) -> Self {
        Self {
            origin,
            started: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::starting_at(Local::now())
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> DateTime<Local> {
        TimeDelta::from_std(self.started.elapsed())
            .ok()
            .and_then(|elapsed| self.origin.checked_add_signed(elapsed))
            .unwrap_or(self.origin)
    }
}
