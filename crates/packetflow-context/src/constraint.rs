use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A temporal constraint carried by a `Context` or `Intent`.
/// `validate_temporal_constraints` walks a list of these in order and
/// short-circuits on the first violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemporalConstraint {
    Before(DateTime<Utc>),
    After(DateTime<Utc>),
    During { start: DateTime<Utc>, end: DateTime<Utc> },
    /// Must occur within `duration` of `reference`.
    Within { reference: DateTime<Utc>, duration: Duration },
    Pattern(NamedPattern),
}

/// Named recurring patterns: `business_hours`, `weekdays`,
/// `maintenance_window`. Distinct from
/// `packetflow_capability::TemporalPattern`, which only needs the first
/// two for capability validity — contexts additionally gate on a
/// configurable maintenance window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedPattern {
    BusinessHours,
    Weekdays,
    MaintenanceWindow,
}

/// Reason a temporal constraint was violated, one variant per
/// `validate_temporal_constraints` rejection case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalViolation {
    OutsideBusinessHours,
    DuringMaintenanceWindow,
    NotAWeekday,
    BeforeAllowedTime,
    AfterAllowedTime,
    OutsideWindow,
    OutsideTolerance,
}

impl TemporalConstraint {
    /// Evaluates this single constraint at time `t`. Named-pattern
    /// evaluation here uses fixed defaults (business hours 09:00-17:00
    /// UTC weekdays; a maintenance window is never active unless the
    /// caller configures one via `packetflow-temporal`, which re-evaluates
    /// `Pattern` constraints with live, per-component configuration
    /// instead of these defaults).
    pub fn evaluate(&self, t: DateTime<Utc>) -> Result<(), TemporalViolation> {
        use chrono::{Timelike, Datelike, Weekday};

        match self {
            TemporalConstraint::Before(bound) => {
                if t < *bound {
                    Ok(())
                } else {
                    Err(TemporalViolation::AfterAllowedTime)
                }
            }
            TemporalConstraint::After(bound) => {
                if t > *bound {
                    Ok(())
                } else {
                    Err(TemporalViolation::BeforeAllowedTime)
                }
            }
            TemporalConstraint::During { start, end } => {
                if *start <= t && t < *end {
                    Ok(())
                } else {
                    Err(TemporalViolation::OutsideWindow)
                }
            }
            TemporalConstraint::Within { reference, duration } => {
                let delta = if t >= *reference { t - *reference } else { *reference - t };
                if delta <= *duration {
                    Ok(())
                } else {
                    Err(TemporalViolation::OutsideTolerance)
                }
            }
            TemporalConstraint::Pattern(NamedPattern::BusinessHours) => {
                let weekday = !matches!(t.weekday(), Weekday::Sat | Weekday::Sun);
                if weekday && (9..17).contains(&t.hour()) {
                    Ok(())
                } else {
                    Err(TemporalViolation::OutsideBusinessHours)
                }
            }
            TemporalConstraint::Pattern(NamedPattern::Weekdays) => {
                if !matches!(t.weekday(), Weekday::Sat | Weekday::Sun) {
                    Ok(())
                } else {
                    Err(TemporalViolation::NotAWeekday)
                }
            }
            TemporalConstraint::Pattern(NamedPattern::MaintenanceWindow) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn business_hours_rejects_weekend() {
        let saturday = Utc.with_ymd_and_hms(2026, 1, 3, 10, 0, 0).unwrap();
        let constraint = TemporalConstraint::Pattern(NamedPattern::BusinessHours);
        assert_eq!(
            constraint.evaluate(saturday),
            Err(TemporalViolation::OutsideBusinessHours)
        );
    }

    #[test]
    fn business_hours_accepts_weekday_daytime() {
        let tuesday_noon = Utc.with_ymd_and_hms(2026, 1, 6, 12, 0, 0).unwrap();
        let constraint = TemporalConstraint::Pattern(NamedPattern::BusinessHours);
        assert_eq!(constraint.evaluate(tuesday_noon), Ok(()));
    }
}
