//! Timestamp sources for the resolution log.

use std::time::{SystemTime, UNIX_EPOCH};

/// Supplies log timestamps, in milliseconds.
pub trait Clock {
    /// Current time in milliseconds.
    fn now_millis(&self) -> u64;
}

/// Wall clock time since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}

/// A clock stuck at one instant. Makes transitions fully reproducible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}
