use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use packetflow_registry::HealthStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single health-check result retained in a component's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRecord {
    pub status: HealthStatus,
    pub checked_at: DateTime<Utc>,
}

/// A single metrics snapshot retained in a component's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub uptime_seconds: u64,
    pub memory_bytes: u64,
    pub message_queue_length: u64,
    pub extra: Value,
    pub collected_at: DateTime<Utc>,
}

/// Bounded ring buffer: pushes past the cap silently drop the oldest
/// entry, the same trim-on-push idiom `kimberlite-directory`'s
/// `ShardMigration` history uses, applied here to two different caps
/// (100 health checks, 1000 metrics) per component.
#[derive(Debug, Clone)]
pub struct BoundedHistory<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    pub fn push(&mut self, entry: T) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&T> {
        self.entries.back()
    }
}

pub const HEALTH_HISTORY_CAP: usize = 100;
pub const METRICS_HISTORY_CAP: usize = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_history_drops_oldest_past_capacity() {
        let mut history = BoundedHistory::new(3);
        history.push(1);
        history.push(2);
        history.push(3);
        history.push(4);
        let values: Vec<_> = history.iter().copied().collect();
        assert_eq!(values, vec![2, 3, 4]);
    }
}
