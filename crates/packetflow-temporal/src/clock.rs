use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

/// A source of the current time. Production code takes `&dyn Clock` (or
/// `impl Clock`) instead of calling `Utc::now()` directly, so scheduling
/// and temporal-constraint logic can be driven deterministically in
/// tests without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant, for tests that need a known `t`.
#[derive(Debug, Clone)]
pub struct FixedClock {
    at: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}

/// A clock that only moves when told to, for tests that need to
/// observe behavior across an explicit sequence of instants (e.g. a
/// periodic schedule firing several times).
#[derive(Debug, Clone)]
pub struct SteppedClock {
    at: Arc<Mutex<DateTime<Utc>>>,
}

impl SteppedClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { at: Arc::new(Mutex::new(start)) }
    }

    pub fn advance(&self, by: Duration) {
        let mut at = self.at.lock().expect("stepped clock mutex poisoned");
        *at += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.at.lock().expect("stepped clock mutex poisoned") = to;
    }
}

impl Clock for SteppedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.at.lock().expect("stepped clock mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_never_moves() {
        let t = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let clock = FixedClock::new(t);
        assert_eq!(clock.now(), t);
        assert_eq!(clock.now(), t);
    }

    #[test]
    fn stepped_clock_advances_on_request() {
        let t = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
        let clock = SteppedClock::new(t);
        assert_eq!(clock.now(), t);
        clock.advance(Duration::hours(1));
        assert_eq!(clock.now(), t + Duration::hours(1));
    }

    #[test]
    fn system_clock_reports_recent_time() {
        let clock = SystemClock;
        let now = Utc::now();
        assert!((clock.now() - now).num_seconds().abs() < 5);
    }
}
