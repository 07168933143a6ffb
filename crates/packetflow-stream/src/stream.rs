use std::sync::Arc;

use chrono::{DateTime, Utc};
use packetflow_capability::{Authorization, Capability, ImplicationGraph};
use packetflow_context::Context;
use packetflow_reactor::Effect;
use packetflow_temporal::Clock;
use tracing::debug;

use crate::buffer::{AdmitOutcome, BackpressureStrategy, StreamBuffer};
use crate::error::StreamError;
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::window::{Window, WindowStrategy};

/// Construction-time configuration for a [`Stream`].
pub struct StreamConfig {
    pub capacity: usize,
    pub backpressure: BackpressureStrategy,
    pub window: WindowStrategy,
    /// A capability every `process_event` call must be authorized
    /// against, if set. `None` means the stream processes events with
    /// no capability gate.
    pub required_capability: Option<Capability>,
}

/// One real-time event stream: `{config, buffer, window, metrics}`, as
/// named. `send_event` admits into the buffer under the configured
/// backpressure policy; `process_event` runs the caller-supplied
/// handler (after a capability check) and feeds the event into the
/// window; `on_window_tick` closes an idle window; `get_metrics` takes
/// a snapshot.
pub struct Stream<T> {
    buffer: StreamBuffer<T>,
    window: Window<T>,
    metrics: Metrics,
    clock: Arc<dyn Clock>,
    required_capability: Option<Capability>,
    graph: ImplicationGraph,
}

impl<T> Stream<T> {
    pub fn new(config: StreamConfig, graph: ImplicationGraph, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        Self {
            buffer: StreamBuffer::new(config.capacity, config.backpressure),
            window: Window::new(config.window),
            metrics: Metrics::new(now),
            clock,
            required_capability: config.required_capability,
            graph,
        }
    }

    /// Admits `event` into the buffer, applying the configured
    /// backpressure policy.
    pub fn send_event(&mut self, event: T) -> AdmitOutcome {
        let outcome = self.buffer.admit(event, self.clock.now());
        if matches!(outcome, AdmitOutcome::BackpressureBlocked | AdmitOutcome::BackpressureThrottled) {
            debug!(?outcome, "event rejected by backpressure policy");
        }
        outcome
    }

    /// Runs `handler` against `event` after checking `ctx` against
    /// this stream's required capability (if any), then folds the
    /// event into the active window.
    pub fn process_event(
        &mut self,
        event: T,
        ctx: &Context,
        handler: impl FnOnce(&T, &Context) -> Result<Vec<Effect>, StreamError>,
    ) -> Result<(Vec<Effect>, Option<Vec<T>>), StreamError>
    where
        T: Clone,
    {
        let now = self.clock.now();
        if let Some(required) = &self.required_capability {
            match ctx.capabilities().authorize(&self.graph, required, now) {
                Authorization::Granted => {}
                Authorization::Insufficient => {
                    self.metrics.record_error();
                    return Err(StreamError::InsufficientCapabilities);
                }
                Authorization::TemporalViolation => {
                    self.metrics.record_error();
                    return Err(StreamError::TemporalConstraintViolation);
                }
            }
        }

        let started = now;
        let result = handler(&event, ctx);
        match result {
            Ok(effects) => {
                self.metrics.record_success(self.clock.now() - started);
                let closed_window = self.window.on_arrival(event, self.clock.now());
                Ok((effects, closed_window))
            }
            Err(err) => {
                self.metrics.record_error();
                Err(err)
            }
        }
    }

    /// Closes an idle window (one with no new arrivals) if its
    /// threshold has been crossed by wall-clock time alone.
    pub fn on_window_tick(&mut self, now: DateTime<Utc>) -> Option<Vec<T>> {
        self.window.tick(now)
    }

    pub fn get_metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot(self.clock.now())
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn drain_buffer(&mut self) -> Vec<T> {
        self.buffer.drain()
    }
}
