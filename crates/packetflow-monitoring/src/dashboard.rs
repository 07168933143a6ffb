use std::collections::HashMap;

use packetflow_registry::HealthStatus;
use packetflow_types::ComponentId;
use serde::{Deserialize, Serialize};

use crate::alert::Alert;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentSummary {
    pub status: HealthStatus,
    pub latest_memory_bytes: u64,
    pub latest_queue_length: u64,
}

/// A point-in-time view over everything the monitor tracks, assembled
/// fresh on each request rather than maintained incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub total_components: usize,
    pub healthy_count: usize,
    pub unhealthy_count: usize,
    pub recent_alerts: Vec<Alert>,
    pub per_component: HashMap<ComponentId, ComponentSummary>,
    pub average_memory_bytes: f64,
    pub average_queue_length: f64,
}
