//! # packetflow-plugin
//!
//! Plugin kinds and metadata, a generic priority-ordered pipeline of
//! stages, and dependency-ordered plugin registration. Generic over the
//! pipeline's item type so this crate carries no dependency on
//! `packetflow-intent` or any other consumer — those crates depend on
//! this one, not the reverse.

mod dependency;
mod error;
mod metadata;
mod stage;

pub use dependency::resolve_order;
pub use error::PluginError;
pub use metadata::{PluginKind, PluginMetadata};
pub use stage::{Pipeline, Stage, StageError};
