//! # packetflow-reactor
//!
//! The `Reactor` trait, the shared `Effect` type, and the
//! authorization/invariant helpers a reactor implementation calls
//! before mutating its state. Modeled directly on
//! `kimberlite_kernel::apply_committed`.

mod effect;
mod error;
mod reactor;

pub use effect::Effect;
pub use error::ReactorError;
pub use reactor::{authorize_intent, debug_assert_effects_invariant, Reactor};
