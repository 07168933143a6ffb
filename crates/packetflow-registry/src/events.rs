use packetflow_types::ComponentId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;

use crate::component::ComponentState;
use crate::health::HealthStatus;

/// Lifecycle events broadcast to registry watchers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegistryEvent {
    ComponentRegistered { id: ComponentId },
    Unregistered { id: ComponentId },
    StateUpdated { id: ComponentId, state: ComponentStateDto },
    ConfigUpdated { id: ComponentId, config: Value },
    DependencyAdded { from: ComponentId, to: ComponentId },
    DependencyRemoved { from: ComponentId, to: ComponentId },
    HealthUpdated { id: ComponentId, status: HealthStatus },
    Died { id: ComponentId },
}

/// Serializable mirror of [`ComponentState`] (the real enum holds no
/// data worth duplicating here, but events travel over `serde` so they
/// need their own derive-friendly type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStateDto {
    Starting,
    Running,
    Died,
}

impl From<ComponentState> for ComponentStateDto {
    fn from(state: ComponentState) -> Self {
        match state {
            ComponentState::Starting => Self::Starting,
            ComponentState::Running => Self::Running,
            ComponentState::Died => Self::Died,
        }
    }
}

/// Broadcasts registry lifecycle events to any number of watchers,
/// grounded on `kimberlite`'s `ProjectionBroadcast`: a bounded
/// `tokio::sync::broadcast` channel where slow watchers simply lag
/// rather than block publishers.
#[derive(Debug, Clone)]
pub struct RegistryEventBus {
    tx: broadcast::Sender<RegistryEvent>,
}

impl RegistryEventBus {
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _rx) = broadcast::channel(buffer_size);
        Self { tx }
    }

    pub fn publish(&self, event: RegistryEvent) -> usize {
        self.tx.send(event).unwrap_or_default()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.tx.subscribe()
    }

    pub fn watcher_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for RegistryEventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
