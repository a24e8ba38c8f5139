//! Time sources for stamping messages.
//!
//! The [`Mailbox`](crate::Mailbox) never calls the system clock directly so
//! tests can pin timestamps and assert exact wire output.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};

/// Source of wall-clock time.
///
/// # Invariants
///
/// - Implementations should not go backwards between calls. The mailbox does
///   not enforce monotonic timestamps, it only records what the clock says.
pub trait Clock: Send + Sync + 'static {
    /// Current wall-clock time in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same underlying instant, so a test can keep one handle and
/// give another to the mailbox.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self { current: Arc::new(Mutex::new(start)) }
    }

    /// Move the clock forward by `secs` seconds.
    pub fn advance_secs(&self, secs: i64) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current += TimeDelta::seconds(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_shares_time_between_clones() {
        let start = DateTime::from_timestamp(1_714_564_800, 0).expect("valid timestamp");
        let clock = ManualClock::starting_at(start);
        let handle = clock.clone();

        handle.advance_secs(90);

        assert_eq!(clock.now(), start + TimeDelta::seconds(90));
    }

    #[test]
    fn system_clock_does_not_go_backwards() {
        let clock = SystemClock;
        let t1 = clock.now();
        let t2 = clock.now();
        assert!(t2 >= t1);
    }
}
