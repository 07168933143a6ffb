use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// How a full (or rate-limited) buffer responds to a new admission
/// attempt. Selected once at stream construction.
///
/// Grounded on `kimberlite-server::bounded_queue::BoundedQueue`'s
/// explicit-admission-policy shape (`try_push` returning a result the
/// caller must act on, rather than a channel that blocks or silently
/// drops): that crate has only one policy (backpressure-to-caller),
/// generalized here into the six the per-stream configuration calls for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackpressureStrategy {
    DropOldest,
    DropNewest,
    Block,
    Throttle { rate_ms: i64 },
    Buffer,
    Adaptive { floor_rate_hz: f64 },
}

/// Result of a single [`StreamBuffer::admit`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmitOutcome {
    Enqueued,
    /// Enqueued under `drop_oldest`, after evicting the buffer's head.
    EnqueuedEvictingOldest,
    /// Discarded silently under `drop_newest`; distinct from
    /// `BackpressureBlocked` since the caller isn't meant to observe a
    /// rejection for this policy, only `block` surfaces one.
    DroppedNewest,
    BackpressureBlocked,
    BackpressureThrottled,
}

/// A capacity-bounded (except under `Buffer`) queue with an explicit
/// per-strategy admission policy, rather than relying on a channel's
/// built-in backpressure.
pub struct StreamBuffer<T> {
    events: VecDeque<T>,
    capacity: usize,
    strategy: BackpressureStrategy,
    backpressure_events: u64,
    last_admit: Option<DateTime<Utc>>,
    adaptive_rate_hz: f64,
}

impl<T> StreamBuffer<T> {
    pub fn new(capacity: usize, strategy: BackpressureStrategy) -> Self {
        Self {
            events: VecDeque::new(),
            capacity,
            strategy,
            backpressure_events: 0,
            last_admit: None,
            adaptive_rate_hz: 100.0,
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn is_full(&self) -> bool {
        self.events.len() >= self.capacity
    }

    pub fn backpressure_events(&self) -> u64 {
        self.backpressure_events
    }

    pub fn drain(&mut self) -> Vec<T> {
        self.events.drain(..).collect()
    }

    /// Attempts to admit `event` at time `now`, applying this buffer's
    /// strategy.
    pub fn admit(&mut self, event: T, now: DateTime<Utc>) -> AdmitOutcome {
        match self.strategy {
            BackpressureStrategy::Buffer => {
                self.events.push_back(event);
                AdmitOutcome::Enqueued
            }
            BackpressureStrategy::DropOldest => {
                if self.is_full() {
                    self.events.pop_front();
                    self.events.push_back(event);
                    self.backpressure_events += 1;
                    AdmitOutcome::EnqueuedEvictingOldest
                } else {
                    self.events.push_back(event);
                    AdmitOutcome::Enqueued
                }
            }
            BackpressureStrategy::DropNewest => {
                if self.is_full() {
                    self.backpressure_events += 1;
                    AdmitOutcome::DroppedNewest
                } else {
                    self.events.push_back(event);
                    AdmitOutcome::Enqueued
                }
            }
            BackpressureStrategy::Block => {
                if self.is_full() {
                    self.backpressure_events += 1;
                    AdmitOutcome::BackpressureBlocked
                } else {
                    self.events.push_back(event);
                    AdmitOutcome::Enqueued
                }
            }
            BackpressureStrategy::Throttle { rate_ms } => self.admit_throttled(event, now, rate_ms),
            BackpressureStrategy::Adaptive { floor_rate_hz } => {
                let fill = self.events.len() as f64 / self.capacity.max(1) as f64;
                self.adaptive_rate_hz =
                    if fill > 0.8 { self.adaptive_rate_hz * 0.9 } else { self.adaptive_rate_hz * 1.1 }
                        .max(floor_rate_hz);
                let rate_ms = (1000.0 / self.adaptive_rate_hz) as i64;
                self.admit_throttled(event, now, rate_ms)
            }
        }
    }

    fn admit_throttled(&mut self, event: T, now: DateTime<Utc>, rate_ms: i64) -> AdmitOutcome {
        if let Some(last) = self.last_admit {
            if (now - last).num_milliseconds() < rate_ms {
                self.backpressure_events += 1;
                return AdmitOutcome::BackpressureThrottled;
            }
        }
        self.last_admit = Some(now);
        self.events.push_back(event);
        AdmitOutcome::Enqueued
    }
}
