use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Liveness band derived from time since the last heartbeat. Drives
/// routing decisions in `packetflow-communication`'s `route_by_health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
    /// No heartbeat has been recorded yet (just registered, not yet
    /// checked or started).
    Unknown,
}

impl HealthStatus {
    const DEGRADED_AFTER: Duration = Duration::seconds(30);
    const UNHEALTHY_AFTER: Duration = Duration::seconds(60);

    pub fn from_heartbeat_age(now: DateTime<Utc>, last_heartbeat: Option<DateTime<Utc>>) -> Self {
        let Some(last_heartbeat) = last_heartbeat else {
            return Self::Unknown;
        };
        let age = now.signed_duration_since(last_heartbeat);
        if age < Self::DEGRADED_AFTER {
            Self::Healthy
        } else if age < Self::UNHEALTHY_AFTER {
            Self::Degraded
        } else {
            Self::Unhealthy
        }
    }

    pub fn is_routable(self) -> bool {
        matches!(self, Self::Healthy | Self::Degraded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_heartbeat_is_healthy() {
        let now = Utc::now();
        assert_eq!(HealthStatus::from_heartbeat_age(now, Some(now)), HealthStatus::Healthy);
    }

    #[test]
    fn no_heartbeat_is_unknown() {
        let now = Utc::now();
        assert_eq!(HealthStatus::from_heartbeat_age(now, None), HealthStatus::Unknown);
    }

    #[test]
    fn stale_heartbeat_bands_degrade_then_unhealthy() {
        let now = Utc::now();
        let degraded_at = now - Duration::seconds(45);
        let unhealthy_at = now - Duration::seconds(90);
        assert_eq!(
            HealthStatus::from_heartbeat_age(now, Some(degraded_at)),
            HealthStatus::Degraded
        );
        assert_eq!(
            HealthStatus::from_heartbeat_age(now, Some(unhealthy_at)),
            HealthStatus::Unhealthy
        );
    }

    #[test]
    fn degraded_and_healthy_are_routable_unhealthy_is_not() {
        assert!(HealthStatus::Healthy.is_routable());
        assert!(HealthStatus::Degraded.is_routable());
        assert!(!HealthStatus::Unhealthy.is_routable());
    }
}
