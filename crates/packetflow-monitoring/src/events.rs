use packetflow_registry::HealthStatus;
use packetflow_types::ComponentId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MonitoringEvent {
    HealthCheckCompleted { id: ComponentId, status: HealthStatus },
    MetricRecorded { id: ComponentId, metrics: Value },
}

/// Same bounded-broadcast shape as `packetflow_registry::RegistryEventBus`,
/// kept as a separate type since monitoring and registry events are
/// independent concerns with independent subscriber sets.
#[derive(Debug, Clone)]
pub struct MonitoringEventBus {
    tx: broadcast::Sender<MonitoringEvent>,
}

impl MonitoringEventBus {
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _rx) = broadcast::channel(buffer_size);
        Self { tx }
    }

    pub fn publish(&self, event: MonitoringEvent) -> usize {
        self.tx.send(event).unwrap_or_default()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MonitoringEvent> {
        self.tx.subscribe()
    }
}

impl Default for MonitoringEventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
