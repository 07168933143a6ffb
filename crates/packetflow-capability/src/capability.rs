use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::constraint::{TemporalPattern, TimeWindow};

/// Resource component of a capability: a concrete identifier (a
/// path-like string or domain-specific token), or the `*`/`:any`
/// wildcard that matches any concrete resource at the same operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Concrete(String),
    Any,
}

impl Resource {
    fn parse(s: impl Into<String>) -> Self {
        let s = s.into();
        if s == "*" || s == ":any" {
            Self::Any
        } else {
            Self::Concrete(s)
        }
    }

    /// Whether `self` (as the grantor side of an implication) matches
    /// `other` (the requested side). `Any` matches everything; a
    /// concrete resource only matches itself.
    fn matches(&self, other: &Resource) -> bool {
        match (self, other) {
            (Resource::Any, _) => true,
            (Resource::Concrete(a), Resource::Concrete(b)) => a == b,
            (Resource::Concrete(_), Resource::Any) => false,
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Any => write!(f, "*"),
            Resource::Concrete(s) => write!(f, "{s}"),
        }
    }
}

/// Optional temporal gate on a capability's validity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constraint {
    Window(TimeWindow),
    Pattern(TemporalPattern),
}

/// A permission value: `{operation, resource, constraints?}`.
///
/// Capabilities are immutable value objects: there are no
/// `&mut self` methods, matching `kimberlite-rbac::Permission`'s treatment
/// as a plain `Copy`-able enum — except here `operation`/`resource` are
/// open strings rather than a closed enum, since the operation set is a
/// declared finite set per capability family supplied by the
/// application, not fixed by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capability {
    operation: String,
    resource: Resource,
    constraint: Option<Constraint>,
}

impl Capability {
    pub fn new(operation: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            resource: Resource::parse(resource),
            constraint: None,
        }
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn constraint(&self) -> Option<&Constraint> {
        self.constraint.as_ref()
    }

    pub fn is_temporal(&self) -> bool {
        self.constraint.is_some()
    }

    /// Whether `self`'s resource covers `other`'s resource (wildcard aware).
    pub(crate) fn resource_covers(&self, other: &Capability) -> bool {
        self.resource.matches(&other.resource)
    }

    /// Whether this capability is valid at time `t`. Non-temporal
    /// capabilities are valid at all times. A named pattern is evaluated
    /// against the default business-hours window (09:00-17:00 UTC,
    /// Mon-Fri); callers needing per-component overrides should use
    /// `packetflow-temporal`'s evaluator instead, which takes a
    /// `Context` carrying component-specific hours.
    pub fn valid_at(&self, t: DateTime<Utc>) -> bool {
        match &self.constraint {
            None => true,
            Some(Constraint::Window(window)) => window.contains(t),
            Some(Constraint::Pattern(TemporalPattern::BusinessHours)) => {
                is_weekday(t) && (9..17).contains(&t.hour())
            }
            Some(Constraint::Pattern(TemporalPattern::Weekdays)) => is_weekday(t),
        }
    }
}

fn is_weekday(t: DateTime<Utc>) -> bool {
    !matches!(t.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun)
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.operation, self.resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn wildcard_resource_matches_concrete() {
        let any = Capability::new("read", "*");
        let concrete = Capability::new("read", "/users/1");
        assert!(any.resource_covers(&concrete));
        assert!(!concrete.resource_covers(&any));
    }

    #[test]
    fn window_constraint_is_half_open() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 1, 1, 17, 0, 0).unwrap();
        let cap = Capability::new("read", "*")
            .with_constraint(Constraint::Window(TimeWindow::new(start, end)));

        assert!(cap.valid_at(start));
        assert!(!cap.valid_at(end));
        assert!(cap.valid_at(start + chrono::Duration::hours(1)));
    }

    #[test]
    fn non_temporal_capability_always_valid() {
        let cap = Capability::new("read", "*");
        let t = Utc.with_ymd_and_hms(2026, 1, 1, 3, 0, 0).unwrap();
        assert!(cap.valid_at(t));
    }
}
