//! # packetflow-stream
//!
//! Real-time event streams: a bounded, explicitly-admission-policy
//! buffer, arrival- and timer-driven windowing, and sampled processing
//! metrics, tied together by [`Stream`]. Grounded on
//! `kimberlite-server::bounded_queue::BoundedQueue`'s explicit
//! admission-policy shape, generalized from one policy to six.

mod buffer;
mod error;
mod metrics;
mod stream;
mod window;

pub use buffer::{AdmitOutcome, BackpressureStrategy, StreamBuffer};
pub use error::StreamError;
pub use metrics::{Metrics, MetricsSnapshot};
pub use stream::{Stream, StreamConfig};
pub use window::{Window, WindowStrategy};
