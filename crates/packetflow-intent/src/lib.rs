//! # packetflow-intent
//!
//! `Intent` values, the validation/transformation pipeline pair, type-
//! and capability-based routing, the five composition strategies, and
//! delegation. Grounded on `kimberlite-kernel::Command`'s immutable
//! value shape for `Intent` itself, and `kimberlite-directory`'s router
//! for the load-then-id tie-break.

mod composition;
mod error;
mod intent;
mod pipeline;
mod router;

pub use composition::run_composite;
pub use error::IntentError;
pub use intent::{create_composite_intent, create_intent, Composition, Intent, IntentIdFactory, IntentMetadata};
pub use pipeline::{IntentPipelines, IntentStage};
pub use router::{delegate, Router};
