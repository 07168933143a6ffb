use chrono::{DateTime, Duration, Utc};

use crate::clock::Clock;

/// `t` strictly precedes `bound`.
pub fn before(t: DateTime<Utc>, bound: DateTime<Utc>) -> bool {
    t < bound
}

/// `t` strictly follows `bound`.
pub fn after(t: DateTime<Utc>, bound: DateTime<Utc>) -> bool {
    t > bound
}

/// `t` lies in the half-open window `[start, end)`.
pub fn during(t: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    start <= t && t < end
}

/// Whether the two half-open windows `[a_start, a_end)` and
/// `[b_start, b_end)` share any instant.
pub fn overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// The (possibly negative) span between two instants.
pub fn duration(from: DateTime<Utc>, to: DateTime<Utc>) -> Duration {
    to - from
}

/// The current time, read through `clock` so callers stay testable.
pub fn now(clock: &dyn Clock) -> DateTime<Utc> {
    clock.now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, h, 0, 0).unwrap()
    }

    #[test]
    fn before_after_are_strict() {
        assert!(before(t(9), t(10)));
        assert!(!before(t(10), t(10)));
        assert!(after(t(11), t(10)));
        assert!(!after(t(10), t(10)));
    }

    #[test]
    fn during_is_half_open() {
        assert!(during(t(9), t(9), t(17)));
        assert!(!during(t(17), t(9), t(17)));
        assert!(during(t(16), t(9), t(17)));
    }

    #[test]
    fn overlap_detects_shared_instant() {
        assert!(overlap(t(9), t(12), t(11), t(15)));
        assert!(!overlap(t(9), t(12), t(12), t(15)));
    }

    #[test]
    fn duration_can_be_negative() {
        assert!(duration(t(12), t(9)) < Duration::zero());
        assert_eq!(duration(t(9), t(12)), Duration::hours(3));
    }
}
