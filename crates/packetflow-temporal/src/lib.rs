//! # packetflow-temporal
//!
//! Temporal operators (`before`/`after`/`during`/`overlap`/`duration`/
//! `now`), named-pattern evaluation with per-component overrides, a
//! `Clock` abstraction that separates physical time from its consumers,
//! and a scheduler that runs items immediately, after a delay, or on a
//! repeating interval.
//!
//! Grounded on `kimberlite-abac`'s `Condition::BusinessHoursOnly`
//! (parameterized here instead of hardcoded) and
//! `kimberlite-sim::adapters::clock`'s `Clock` trait separating
//! simulation time from production wall-clock time.

mod clock;
mod error;
mod operators;
mod patterns;
mod schedule;
mod validator;

pub use clock::{Clock, FixedClock, SteppedClock, SystemClock};
pub use error::TemporalError;
pub use operators::{after, before, during, duration, now, overlap};
pub use patterns::{BusinessHours, PatternEvaluator};
pub use schedule::{ScheduleId, ScheduleStatus, ScheduleStrategy, Scheduler};
pub use validator::TemporalValidator;
