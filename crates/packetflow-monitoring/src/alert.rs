use chrono::{DateTime, Utc};
use packetflow_registry::HealthStatus;
use packetflow_types::ComponentId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Critical,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub component_id: ComponentId,
    pub severity: AlertSeverity,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Tracks one active alert per component: `unhealthy` raises a
/// `critical` alert, `degraded` raises `warning`, and a transition back
/// to `healthy` clears it. Only the most recent status transition
/// matters, so this holds at most one alert per component rather than
/// a running log (the bounded dashboard history in [`crate::dashboard`]
/// is what retains the last 10 for display).
#[derive(Debug, Default)]
pub struct AlertManager {
    active: HashMap<ComponentId, Alert>,
    recent: Vec<Alert>,
}

const RECENT_CAP: usize = 10;

impl AlertManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a health status transition, returning the alert raised
    /// or cleared, if any.
    pub fn observe(&mut self, component_id: &ComponentId, status: HealthStatus) {
        match status {
            HealthStatus::Unhealthy => self.raise(component_id, AlertSeverity::Critical, "component is unhealthy"),
            HealthStatus::Degraded => self.raise(component_id, AlertSeverity::Warning, "component is degraded"),
            HealthStatus::Healthy => self.clear(component_id),
        }
    }

    fn raise(&mut self, component_id: &ComponentId, severity: AlertSeverity, message: &str) {
        let alert = Alert {
            component_id: component_id.clone(),
            severity,
            message: message.to_string(),
            created_at: Utc::now(),
        };
        self.active.insert(component_id.clone(), alert.clone());
        self.recent.push(alert);
        if self.recent.len() > RECENT_CAP {
            let overflow = self.recent.len() - RECENT_CAP;
            self.recent.drain(0..overflow);
        }
    }

    fn clear(&mut self, component_id: &ComponentId) {
        self.active.remove(component_id);
    }

    /// Drops a component's active alert entirely, on unregistration
    /// rather than a health transition. `recent` is an append-only log
    /// of past alerts and is left untouched.
    pub fn forget(&mut self, component_id: &ComponentId) {
        self.active.remove(component_id);
    }

    pub fn active_alerts(&self) -> impl Iterator<Item = &Alert> {
        self.active.values()
    }

    pub fn recent_alerts(&self) -> &[Alert] {
        &self.recent
    }
}
