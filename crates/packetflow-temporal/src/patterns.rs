use std::collections::HashMap;

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use packetflow_context::{NamedPattern, TemporalViolation};
use packetflow_types::ComponentId;

/// Business-hours window for one component, in UTC hour-of-day
/// `[start_hour, end_hour)`. Defaults to `kimberlite-abac`'s hardcoded
/// `BusinessHoursOnly` rule (09:00-17:00 UTC), generalized here into a
/// value the caller can override per component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self { start_hour: 9, end_hour: 17 }
    }
}

impl BusinessHours {
    fn contains(&self, t: DateTime<Utc>) -> bool {
        (self.start_hour..self.end_hour).contains(&t.hour())
    }
}

fn is_weekday(t: DateTime<Utc>) -> bool {
    !matches!(t.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Evaluates named temporal patterns with per-component overrides for
/// business hours and maintenance windows, instead of the single fixed
/// rule the underlying pattern enum's default evaluation applies.
#[derive(Debug, Default)]
pub struct PatternEvaluator {
    business_hours: HashMap<ComponentId, BusinessHours>,
    maintenance_windows: HashMap<ComponentId, Vec<(DateTime<Utc>, DateTime<Utc>)>>,
}

impl PatternEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_business_hours(&mut self, component: ComponentId, hours: BusinessHours) {
        self.business_hours.insert(component, hours);
    }

    pub fn add_maintenance_window(
        &mut self,
        component: ComponentId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) {
        self.maintenance_windows.entry(component).or_default().push((start, end));
    }

    fn business_hours_for(&self, component: Option<&ComponentId>) -> BusinessHours {
        component
            .and_then(|c| self.business_hours.get(c))
            .copied()
            .unwrap_or_default()
    }

    /// Evaluates `pattern` at `t`, optionally scoped to `component`'s
    /// overrides. `component == None` falls back to the default
    /// business-hours window and treats maintenance windows as never
    /// active.
    pub fn evaluate(
        &self,
        pattern: NamedPattern,
        component: Option<&ComponentId>,
        t: DateTime<Utc>,
    ) -> Result<(), TemporalViolation> {
        match pattern {
            NamedPattern::BusinessHours => {
                if is_weekday(t) && self.business_hours_for(component).contains(t) {
                    Ok(())
                } else {
                    Err(TemporalViolation::OutsideBusinessHours)
                }
            }
            NamedPattern::Weekdays => {
                if is_weekday(t) {
                    Ok(())
                } else {
                    Err(TemporalViolation::NotAWeekday)
                }
            }
            NamedPattern::MaintenanceWindow => {
                let active = component
                    .and_then(|c| self.maintenance_windows.get(c))
                    .is_some_and(|windows| windows.iter().any(|(s, e)| *s <= t && t < *e));
                if active {
                    Err(TemporalViolation::DuringMaintenanceWindow)
                } else {
                    Ok(())
                }
            }
        }
    }
}
