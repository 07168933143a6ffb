use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use packetflow_context::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::clock::Clock;

/// Identifies one scheduled item, independent of the underlying
/// `tokio` task that runs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleId(Uuid);

impl ScheduleId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a scheduled item is run relative to the moment it's submitted.
#[derive(Debug, Clone, Copy)]
pub enum ScheduleStrategy {
    /// Runs in-line, synchronously, before `schedule` returns.
    Immediate,
    /// Runs once after `delay`.
    Delayed(StdDuration),
    /// Runs repeatedly every `interval`, until cancelled.
    Periodic(StdDuration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Scheduled,
    Running,
    Completed,
    Cancelled,
    Failed,
}

#[derive(Debug, Clone)]
struct ScheduleRecord {
    status: ScheduleStatus,
    created_at: DateTime<Utc>,
}

type Handler<T> = dyn Fn(T, Context) -> Result<(), String> + Send + Sync;

/// Runs scheduled items (most often intents) under one of the three
/// strategies in [`ScheduleStrategy`], tracking status in memory only —
/// there is no persistence across process restarts.
///
/// Generic over the scheduled item type so this crate never needs to
/// depend on `packetflow-intent`; the caller supplies both the item and
/// the handler that knows how to run it.
pub struct Scheduler<T> {
    clock: Arc<dyn Clock>,
    handler: Arc<Handler<T>>,
    records: Arc<Mutex<HashMap<ScheduleId, ScheduleRecord>>>,
    tasks: Mutex<HashMap<ScheduleId, tokio::task::JoinHandle<()>>>,
}

impl<T> Scheduler<T>
where
    T: Clone + Send + 'static,
{
    pub fn new(
        clock: Arc<dyn Clock>,
        handler: impl Fn(T, Context) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            clock,
            handler: Arc::new(handler),
            records: Arc::new(Mutex::new(HashMap::new())),
            tasks: Mutex::new(HashMap::new()),
        }
    }

    pub fn status(&self, id: ScheduleId) -> Option<ScheduleStatus> {
        self.records.lock().expect("scheduler mutex poisoned").get(&id).map(|r| r.status)
    }

    /// Cancels a delayed or periodic schedule. A no-op (returns `false`)
    /// if `id` is unknown or has already reached a terminal status.
    pub fn cancel(&self, id: ScheduleId) -> bool {
        let mut records = self.records.lock().expect("scheduler mutex poisoned");
        let Some(record) = records.get_mut(&id) else { return false };
        if !matches!(record.status, ScheduleStatus::Scheduled | ScheduleStatus::Running) {
            return false;
        }
        record.status = ScheduleStatus::Cancelled;
        drop(records);

        if let Some(handle) = self.tasks.lock().expect("scheduler mutex poisoned").remove(&id) {
            handle.abort();
        }
        debug!(schedule = %id, "schedule cancelled");
        true
    }

    pub fn schedule(&self, item: T, ctx: Context, strategy: ScheduleStrategy) -> ScheduleId {
        let id = ScheduleId::new();
        self.records.lock().expect("scheduler mutex poisoned").insert(
            id,
            ScheduleRecord { status: ScheduleStatus::Scheduled, created_at: self.clock.now() },
        );

        match strategy {
            ScheduleStrategy::Immediate => {
                run_once(&self.records, &self.handler, id, item, ctx);
            }
            ScheduleStrategy::Delayed(delay) => {
                let records = Arc::clone(&self.records);
                let handler = Arc::clone(&self.handler);
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    run_once(&records, &handler, id, item, ctx);
                });
                self.tasks.lock().expect("scheduler mutex poisoned").insert(id, handle);
            }
            ScheduleStrategy::Periodic(interval) => {
                let records = Arc::clone(&self.records);
                let handler = Arc::clone(&self.handler);
                let handle = tokio::spawn(async move {
                    let mut ticker = tokio::time::interval(interval);
                    ticker.tick().await;
                    loop {
                        ticker.tick().await;
                        let still_active = matches!(
                            records.lock().expect("scheduler mutex poisoned").get(&id).map(|r| r.status),
                            Some(ScheduleStatus::Scheduled | ScheduleStatus::Running)
                        );
                        if !still_active {
                            return;
                        }
                        run_once(&records, &handler, id, item.clone(), ctx.clone());
                    }
                });
                self.tasks.lock().expect("scheduler mutex poisoned").insert(id, handle);
            }
        }

        id
    }
}

fn run_once<T>(
    records: &Arc<Mutex<HashMap<ScheduleId, ScheduleRecord>>>,
    handler: &Arc<Handler<T>>,
    id: ScheduleId,
    item: T,
    ctx: Context,
) {
    if let Some(record) = records.lock().expect("scheduler mutex poisoned").get_mut(&id) {
        record.status = ScheduleStatus::Running;
    }
    let outcome = handler(item, ctx);
    if let Err(reason) = &outcome {
        warn!(schedule = %id, %reason, "scheduled item failed");
    }
    if let Some(record) = records.lock().expect("scheduler mutex poisoned").get_mut(&id) {
        // A periodic schedule that's already been cancelled mid-run
        // stays cancelled rather than flipping back to completed.
        if record.status == ScheduleStatus::Running {
            record.status = if outcome.is_ok() { ScheduleStatus::Completed } else { ScheduleStatus::Failed };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use packetflow_types::UserId;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ctx() -> Context {
        Context::builder(UserId::new("u1"))
            .session_id(packetflow_types::SessionId::new())
            .build()
            .unwrap()
    }

    #[test]
    fn immediate_strategy_runs_synchronously_and_completes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let scheduler = Scheduler::new(Arc::new(SystemClock), move |item: i32, _ctx| {
            calls_clone.fetch_add(item as usize, Ordering::SeqCst);
            Ok(())
        });

        let id = scheduler.schedule(5, ctx(), ScheduleStrategy::Immediate);
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert_eq!(scheduler.status(id), Some(ScheduleStatus::Completed));
    }

    #[test]
    fn immediate_strategy_records_failure() {
        let scheduler = Scheduler::new(Arc::new(SystemClock), |_item: i32, _ctx| {
            Err("boom".to_string())
        });
        let id = scheduler.schedule(1, ctx(), ScheduleStrategy::Immediate);
        assert_eq!(scheduler.status(id), Some(ScheduleStatus::Failed));
    }

    #[tokio::test]
    async fn delayed_strategy_runs_after_the_delay() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let scheduler = Scheduler::new(Arc::new(SystemClock), move |_item: i32, _ctx| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let id = scheduler.schedule(1, ctx(), ScheduleStrategy::Delayed(StdDuration::from_millis(20)));
        assert_eq!(scheduler.status(id), Some(ScheduleStatus::Scheduled));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        tokio::time::sleep(StdDuration::from_millis(60)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.status(id), Some(ScheduleStatus::Completed));
    }

    #[tokio::test]
    async fn cancelling_a_periodic_schedule_stops_future_runs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let scheduler = Scheduler::new(Arc::new(SystemClock), move |_item: i32, _ctx| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let id = scheduler.schedule(1, ctx(), ScheduleStrategy::Periodic(StdDuration::from_millis(10)));

        tokio::time::sleep(StdDuration::from_millis(45)).await;
        let ticks_before_cancel = calls.load(Ordering::SeqCst);
        assert!(ticks_before_cancel >= 2);

        assert!(scheduler.cancel(id));
        assert_eq!(scheduler.status(id), Some(ScheduleStatus::Cancelled));

        tokio::time::sleep(StdDuration::from_millis(50)).await;
        assert_eq!(calls.load(Ordering::SeqCst), ticks_before_cancel);
    }
}
