use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use packetflow_registry::{HealthStatus, Registry, RegistryEvent};
use packetflow_types::ComponentId;
use tokio::sync::Mutex;
use tracing::debug;

use crate::alert::AlertManager;
use crate::dashboard::{ComponentSummary, DashboardSnapshot};
use crate::error::MonitoringError;
use crate::events::{MonitoringEvent, MonitoringEventBus};
use crate::history::{BoundedHistory, HealthRecord, MetricsRecord, HEALTH_HISTORY_CAP, METRICS_HISTORY_CAP};

struct ComponentTracking {
    health: BoundedHistory<HealthRecord>,
    metrics: BoundedHistory<MetricsRecord>,
}

impl Default for ComponentTracking {
    fn default() -> Self {
        Self {
            health: BoundedHistory::new(HEALTH_HISTORY_CAP),
            metrics: BoundedHistory::new(METRICS_HISTORY_CAP),
        }
    }
}

/// Runs the two periodic monitoring cycles described for the registry:
/// health checks and metrics collection, each on its own interval. One
/// [`Monitor`] wraps a shared [`Registry`] handle so both cycles see
/// the same component set the rest of the system is registering
/// against.
pub struct Monitor {
    registry: Arc<Mutex<Registry>>,
    tracking: Mutex<HashMap<ComponentId, ComponentTracking>>,
    alerts: Mutex<AlertManager>,
    events: MonitoringEventBus,
    health_check_interval: Duration,
    metrics_collection_interval: Duration,
}

impl Monitor {
    pub fn new(
        registry: Arc<Mutex<Registry>>,
        health_check_interval_ms: u64,
        metrics_collection_interval_ms: u64,
    ) -> Self {
        Self {
            registry,
            tracking: Mutex::new(HashMap::new()),
            alerts: Mutex::new(AlertManager::new()),
            events: MonitoringEventBus::default(),
            health_check_interval: Duration::from_millis(health_check_interval_ms),
            metrics_collection_interval: Duration::from_millis(metrics_collection_interval_ms),
        }
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<MonitoringEvent> {
        self.events.subscribe()
    }

    /// Spawns the health-check, metrics-collection, and unregistration
    /// purge loops as independent background tasks, returning their
    /// join handles so the caller can cancel or await them.
    pub fn spawn(
        self: &Arc<Self>,
    ) -> (tokio::task::JoinHandle<()>, tokio::task::JoinHandle<()>, tokio::task::JoinHandle<()>) {
        let health_monitor = Arc::clone(self);
        let health_task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(health_monitor.health_check_interval);
            loop {
                ticker.tick().await;
                health_monitor.run_health_check_cycle().await;
            }
        });

        let metrics_monitor = Arc::clone(self);
        let metrics_task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(metrics_monitor.metrics_collection_interval);
            loop {
                ticker.tick().await;
                metrics_monitor.run_metrics_collection_cycle().await;
            }
        });

        let purge_monitor = Arc::clone(self);
        let purge_task = tokio::spawn(async move {
            let mut events = purge_monitor.registry.lock().await.subscribe();
            while let Ok(event) = events.recv().await {
                if let RegistryEvent::Unregistered { id } = event {
                    purge_monitor.forget(&id).await;
                }
            }
        });

        (health_task, metrics_task, purge_task)
    }

    /// Drops a component's health/metrics history and active alert,
    /// on unregistration rather than a health transition. Also called
    /// directly by callers that don't run the background purge task.
    pub async fn forget(&self, id: &ComponentId) {
        self.tracking.lock().await.remove(id);
        self.alerts.lock().await.forget(id);
    }

    pub async fn run_health_check_cycle(&self) {
        let ids: Vec<ComponentId> = {
            let registry = self.registry.lock().await;
            registry.component_ids().cloned().collect()
        };

        for id in ids {
            let status = {
                let mut registry = self.registry.lock().await;
                match registry.check_component_health(&id) {
                    Ok(status) => status,
                    Err(_) => continue,
                }
            };

            self.alerts.lock().await.observe(&id, status);

            let mut tracking = self.tracking.lock().await;
            tracking.entry(id.clone()).or_default().health.push(HealthRecord {
                status,
                checked_at: Utc::now(),
            });

            self.events
                .publish(MonitoringEvent::HealthCheckCompleted { id, status });
        }
        debug!("health check cycle completed");
    }

    pub async fn run_metrics_collection_cycle(&self) {
        let ids: Vec<ComponentId> = {
            let registry = self.registry.lock().await;
            registry.component_ids().cloned().collect()
        };

        for id in ids {
            let extra = {
                let registry = self.registry.lock().await;
                registry.metrics_of(&id).unwrap_or_default()
            };

            let record = MetricsRecord {
                uptime_seconds: extra
                    .get("uptime_seconds")
                    .and_then(serde_json::Value::as_u64)
                    .unwrap_or(0),
                memory_bytes: extra
                    .get("memory_bytes")
                    .and_then(serde_json::Value::as_u64)
                    .unwrap_or(0),
                message_queue_length: extra
                    .get("message_queue_length")
                    .and_then(serde_json::Value::as_u64)
                    .unwrap_or(0),
                extra: extra.clone(),
                collected_at: Utc::now(),
            };

            let mut tracking = self.tracking.lock().await;
            tracking.entry(id.clone()).or_default().metrics.push(record);

            self.events
                .publish(MonitoringEvent::MetricRecorded { id, metrics: extra });
        }
        debug!("metrics collection cycle completed");
    }

    pub async fn health_history(&self, id: &ComponentId) -> Result<Vec<HealthRecord>, MonitoringError> {
        let tracking = self.tracking.lock().await;
        tracking
            .get(id)
            .map(|t| t.health.iter().cloned().collect())
            .ok_or_else(|| MonitoringError::ComponentNotFound(id.clone()))
    }

    pub async fn dashboard_snapshot(&self) -> DashboardSnapshot {
        let tracking = self.tracking.lock().await;
        let alerts = self.alerts.lock().await;

        let mut per_component = HashMap::new();
        let mut healthy_count = 0;
        let mut unhealthy_count = 0;
        let mut memory_total = 0u64;
        let mut queue_total = 0u64;
        let mut sample_count = 0u64;

        for (id, tracked) in tracking.iter() {
            let status = tracked
                .health
                .latest()
                .map(|r| r.status)
                .unwrap_or(HealthStatus::Unhealthy);
            let metrics = tracked.metrics.latest();

            match status {
                HealthStatus::Healthy | HealthStatus::Degraded => healthy_count += 1,
                HealthStatus::Unhealthy => unhealthy_count += 1,
            }

            let memory = metrics.map(|m| m.memory_bytes).unwrap_or(0);
            let queue = metrics.map(|m| m.message_queue_length).unwrap_or(0);
            memory_total += memory;
            queue_total += queue;
            sample_count += 1;

            per_component.insert(
                id.clone(),
                ComponentSummary {
                    status,
                    latest_memory_bytes: memory,
                    latest_queue_length: queue,
                },
            );
        }

        DashboardSnapshot {
            total_components: tracking.len(),
            healthy_count,
            unhealthy_count,
            recent_alerts: alerts.recent_alerts().to_vec(),
            per_component,
            average_memory_bytes: if sample_count == 0 {
                0.0
            } else {
                memory_total as f64 / sample_count as f64
            },
            average_queue_length: if sample_count == 0 {
                0.0
            } else {
                queue_total as f64 / sample_count as f64
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packetflow_registry::PassiveModule;
    use serde_json::json;

    #[tokio::test]
    async fn health_check_cycle_records_healthy_component() {
        let registry = Arc::new(Mutex::new(Registry::new()));
        let id = ComponentId::new("worker");
        registry
            .lock()
            .await
            .register_component(id.clone(), Box::new(PassiveModule), json!({}))
            .unwrap();

        let monitor = Monitor::new(Arc::clone(&registry), 30_000, 60_000);
        monitor.run_health_check_cycle().await;

        let history = monitor.health_history(&id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn forget_purges_health_metrics_and_alert_state() {
        let registry = Arc::new(Mutex::new(Registry::new()));
        let id = ComponentId::new("worker");
        registry
            .lock()
            .await
            .register_component(id.clone(), Box::new(PassiveModule), json!({}))
            .unwrap();

        let monitor = Monitor::new(Arc::clone(&registry), 30_000, 60_000);
        monitor.run_health_check_cycle().await;
        monitor.run_metrics_collection_cycle().await;
        assert_eq!(monitor.health_history(&id).await.unwrap().len(), 1);

        monitor.forget(&id).await;

        assert!(matches!(
            monitor.health_history(&id).await,
            Err(MonitoringError::ComponentNotFound(_))
        ));
        let snapshot = monitor.dashboard_snapshot().await;
        assert_eq!(snapshot.total_components, 0);
    }

    #[tokio::test]
    async fn unregistering_a_component_purges_its_monitoring_state() {
        let registry = Arc::new(Mutex::new(Registry::new()));
        let id = ComponentId::new("worker");
        registry
            .lock()
            .await
            .register_component(id.clone(), Box::new(PassiveModule), json!({}))
            .unwrap();

        let monitor = Arc::new(Monitor::new(Arc::clone(&registry), 30_000, 60_000));
        monitor.run_health_check_cycle().await;
        assert_eq!(monitor.health_history(&id).await.unwrap().len(), 1);

        let (health_task, metrics_task, purge_task) = monitor.spawn();
        health_task.abort();
        metrics_task.abort();

        registry.lock().await.unregister_component(&id).unwrap();

        // give the purge task a chance to observe the broadcasted event
        for _ in 0..100 {
            if monitor.health_history(&id).await.is_err() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        }
        purge_task.abort();

        assert!(matches!(
            monitor.health_history(&id).await,
            Err(MonitoringError::ComponentNotFound(_))
        ));
    }

    #[tokio::test]
    async fn dashboard_snapshot_reports_counts() {
        let registry = Arc::new(Mutex::new(Registry::new()));
        let id = ComponentId::new("worker");
        registry
            .lock()
            .await
            .register_component(id.clone(), Box::new(PassiveModule), json!({}))
            .unwrap();

        let monitor = Monitor::new(Arc::clone(&registry), 30_000, 60_000);
        monitor.run_health_check_cycle().await;

        let snapshot = monitor.dashboard_snapshot().await;
        assert_eq!(snapshot.total_components, 1);
        assert_eq!(snapshot.healthy_count, 1);
        assert_eq!(snapshot.unhealthy_count, 0);
    }
}
