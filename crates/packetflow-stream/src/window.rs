use chrono::{DateTime, Duration, Utc};

/// A windowing strategy selected at stream construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowStrategy {
    /// `[start, start+size)`; the first arrival at or after `start+size`
    /// triggers processing of the current events and starts a new
    /// window at that arrival's time.
    Time { size: Duration },
    /// `n` arrivals trigger processing; the `(n+1)`th starts a new
    /// window.
    Count { n: usize },
    /// Arrivals within `timeout` of the last one extend the session;
    /// an arrival beyond `timeout` triggers processing and starts a new
    /// session.
    Session { timeout: Duration },
}

/// Accumulates events under a [`WindowStrategy`], yielding the closed
/// window's events whenever a threshold is crossed. Window processing
/// itself (turning events into effects) is the caller's responsibility;
/// this type only decides when a window closes.
pub struct Window<T> {
    strategy: WindowStrategy,
    events: Vec<T>,
    anchor: Option<DateTime<Utc>>,
}

impl<T> Window<T> {
    pub fn new(strategy: WindowStrategy) -> Self {
        Self { strategy, events: Vec::new(), anchor: None }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Records an arrival at `now`, returning the closed window's
    /// events if this arrival crossed a threshold.
    pub fn on_arrival(&mut self, event: T, now: DateTime<Utc>) -> Option<Vec<T>> {
        match self.strategy {
            WindowStrategy::Time { size } => {
                let start = *self.anchor.get_or_insert(now);
                if now >= start + size {
                    let closed = std::mem::take(&mut self.events);
                    self.anchor = Some(now);
                    self.events.push(event);
                    (!closed.is_empty()).then_some(closed)
                } else {
                    self.events.push(event);
                    None
                }
            }
            WindowStrategy::Count { n } => {
                self.events.push(event);
                if self.events.len() >= n {
                    Some(std::mem::take(&mut self.events))
                } else {
                    None
                }
            }
            WindowStrategy::Session { timeout } => {
                let beyond_timeout = self.anchor.is_some_and(|last| now - last > timeout);
                self.anchor = Some(now);
                if beyond_timeout && !self.events.is_empty() {
                    let closed = std::mem::take(&mut self.events);
                    self.events.push(event);
                    Some(closed)
                } else {
                    self.events.push(event);
                    None
                }
            }
        }
    }

    /// Closes the window from a timer tick rather than a new arrival —
    /// used for `Time`/`Session` windows that would otherwise sit open
    /// indefinitely while idle. `Count` windows only close on arrival
    /// and always return `None` here.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Vec<T>> {
        match self.strategy {
            WindowStrategy::Time { size } => {
                let start = self.anchor?;
                if now >= start + size && !self.events.is_empty() {
                    self.anchor = Some(now);
                    Some(std::mem::take(&mut self.events))
                } else {
                    None
                }
            }
            WindowStrategy::Session { timeout } => {
                let last = self.anchor?;
                if now - last > timeout && !self.events.is_empty() {
                    Some(std::mem::take(&mut self.events))
                } else {
                    None
                }
            }
            WindowStrategy::Count { .. } => None,
        }
    }
}
