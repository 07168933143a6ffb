use std::collections::HashMap;
use std::time::Duration;

use packetflow_types::ComponentId;

/// Running-average latency tracker, one entry per target component.
/// Updated on each completed `send_request`, per-target so a single
/// slow component doesn't skew the picture for the rest of the system.
#[derive(Debug, Default)]
pub struct LatencyStats {
    averages: HashMap<ComponentId, RunningAverage>,
}

#[derive(Debug, Clone, Copy)]
struct RunningAverage {
    count: u64,
    average_ms: f64,
}

impl LatencyStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, target: &ComponentId, latency: Duration) {
        let entry = self.averages.entry(target.clone()).or_insert(RunningAverage {
            count: 0,
            average_ms: 0.0,
        });
        entry.count += 1;
        let sample_ms = latency.as_secs_f64() * 1000.0;
        entry.average_ms += (sample_ms - entry.average_ms) / entry.count as f64;
    }

    pub fn average_ms(&self, target: &ComponentId) -> Option<f64> {
        self.averages.get(target).map(|a| a.average_ms)
    }

    pub fn sample_count(&self, target: &ComponentId) -> u64 {
        self.averages.get(target).map(|a| a.count).unwrap_or(0)
    }
}
