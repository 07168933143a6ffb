use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::health::HealthStatus;

/// Result of a liveness probe against a registered component's module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthProbe {
    Alive,
    Dead,
}

/// Hook a registered component can implement to report its own health
/// and metrics. Components that don't implement one fall back to the
/// registry's built-in heartbeat-age probe and an empty metrics map —
/// the "resolve the module's health function if present else probe
/// liveness" behavior.
pub trait ComponentModule: Send + Sync {
    fn health_check(&self) -> Option<HealthProbe> {
        None
    }

    fn get_metrics(&self) -> Value {
        Value::Object(serde_json::Map::new())
    }
}

/// A module with no custom behavior; registered components that only
/// need config and dependency tracking use this.
pub struct PassiveModule;

impl ComponentModule for PassiveModule {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentState {
    Starting,
    Running,
    Died,
}

pub struct ComponentEntry {
    pub(crate) module: Box<dyn ComponentModule>,
    pub(crate) config: Value,
    pub(crate) state: ComponentState,
    pub(crate) last_heartbeat: DateTime<Utc>,
    pub(crate) load_factor: f64,
}

impl ComponentEntry {
    pub fn new(module: Box<dyn ComponentModule>, config: Value) -> Self {
        Self {
            module,
            config,
            state: ComponentState::Starting,
            last_heartbeat: Utc::now(),
            load_factor: 0.0,
        }
    }

    pub fn config(&self) -> &Value {
        &self.config
    }

    pub fn state(&self) -> ComponentState {
        self.state
    }

    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    pub fn heartbeat(&mut self) {
        self.last_heartbeat = Utc::now();
    }

    pub(crate) fn resolve_health(&self, now: DateTime<Utc>) -> HealthStatus {
        match self.module.health_check() {
            Some(HealthProbe::Alive) => HealthStatus::from_heartbeat_age(now, Some(self.last_heartbeat)),
            Some(HealthProbe::Dead) => HealthStatus::Unhealthy,
            None => HealthStatus::from_heartbeat_age(now, Some(self.last_heartbeat)),
        }
    }

    pub fn metrics(&self) -> Value {
        self.module.get_metrics()
    }
}
