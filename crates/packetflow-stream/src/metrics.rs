use chrono::Duration;
use serde::{Deserialize, Serialize};

/// A point-in-time snapshot of a stream's processing metrics.
///
/// Grounded on `kimberlite-server`'s pattern of exposing a `Metrics`
/// struct with counters sampled by the monitoring component rather than
/// pushed, same shape `packetflow-monitoring` uses for components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub processed_count: u64,
    pub error_count: u64,
    pub backpressure_events: u64,
    pub processing_rate: f64,
    pub error_rate: f64,
    pub avg_latency_ms: f64,
}

/// EMA smoothing factor for `avg_latency_ms`.
const LATENCY_EMA_ALPHA: f64 = 0.2;

pub struct Metrics {
    processed_count: u64,
    error_count: u64,
    backpressure_events: u64,
    avg_latency_ms: f64,
    started_at: chrono::DateTime<chrono::Utc>,
}

impl Metrics {
    pub fn new(now: chrono::DateTime<chrono::Utc>) -> Self {
        Self { processed_count: 0, error_count: 0, backpressure_events: 0, avg_latency_ms: 0.0, started_at: now }
    }

    pub fn record_success(&mut self, latency: Duration) {
        self.processed_count += 1;
        self.update_latency_ema(latency);
    }

    pub fn record_error(&mut self) {
        self.error_count += 1;
    }

    pub fn record_backpressure_event(&mut self) {
        self.backpressure_events += 1;
    }

    fn update_latency_ema(&mut self, latency: Duration) {
        let sample = latency.num_milliseconds() as f64;
        self.avg_latency_ms = if self.processed_count == 1 {
            sample
        } else {
            LATENCY_EMA_ALPHA * sample + (1.0 - LATENCY_EMA_ALPHA) * self.avg_latency_ms
        };
    }

    pub fn snapshot(&self, now: chrono::DateTime<chrono::Utc>) -> MetricsSnapshot {
        let elapsed = (now - self.started_at).num_milliseconds() as f64 / 1000.0;
        let total = self.processed_count + self.error_count;
        MetricsSnapshot {
            processed_count: self.processed_count,
            error_count: self.error_count,
            backpressure_events: self.backpressure_events,
            processing_rate: if elapsed > 0.0 { self.processed_count as f64 / elapsed } else { 0.0 },
            error_rate: if total > 0 { self.error_count as f64 / total as f64 } else { 0.0 },
            avg_latency_ms: self.avg_latency_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn error_rate_divides_by_total_processed_and_errored() {
        let now = Utc::now();
        let mut metrics = Metrics::new(now);
        metrics.record_success(Duration::milliseconds(10));
        metrics.record_error();
        let snapshot = metrics.snapshot(now + Duration::seconds(1));
        assert_eq!(snapshot.error_rate, 0.5);
    }

    #[test]
    fn avg_latency_converges_toward_the_most_recent_samples() {
        let now = Utc::now();
        let mut metrics = Metrics::new(now);
        for _ in 0..20 {
            metrics.record_success(Duration::milliseconds(100));
        }
        let snapshot = metrics.snapshot(now);
        assert!((snapshot.avg_latency_ms - 100.0).abs() < 1.0);
    }

    #[test]
    fn no_activity_yields_zeroed_rates() {
        let now = Utc::now();
        let metrics = Metrics::new(now);
        let snapshot = metrics.snapshot(now + Duration::seconds(5));
        assert_eq!(snapshot.processing_rate, 0.0);
        assert_eq!(snapshot.error_rate, 0.0);
    }
}
