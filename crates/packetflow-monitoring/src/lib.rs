//! # packetflow-monitoring
//!
//! Two periodic cycles — health checks and metrics collection — driven
//! over a shared [`packetflow_registry::Registry`], bounded history per
//! component, alerting on health transitions, and dashboard snapshots.

mod alert;
mod dashboard;
mod error;
mod events;
mod history;
mod monitor;

pub use alert::{Alert, AlertManager, AlertSeverity};
pub use dashboard::{ComponentSummary, DashboardSnapshot};
pub use error::MonitoringError;
pub use events::{MonitoringEvent, MonitoringEventBus};
pub use history::{BoundedHistory, HealthRecord, MetricsRecord, HEALTH_HISTORY_CAP, METRICS_HISTORY_CAP};
pub use monitor::Monitor;
