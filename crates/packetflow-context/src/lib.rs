//! # packetflow-context
//!
//! `Context` is PacketFlow's request-scoped value carried across every
//! component hop: user/session identity, the capability set the caller
//! presents, a trace of visited components, and optional temporal gates.
//! Grounded on `kimberlite-abac`'s request-attribute record, with
//! propagation/composition rules layered on top.

mod constraint;
mod context;
mod error;

pub use constraint::{NamedPattern, TemporalConstraint, TemporalViolation};
pub use context::{CompositionStrategy, Context, ContextBuilder, PropagationStrategy};
pub use error::ContextError;
