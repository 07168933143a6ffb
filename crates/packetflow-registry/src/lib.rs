//! # packetflow-registry
//!
//! Component registration, a dependency DAG with cycle detection,
//! health banding, and lifecycle event broadcast. Grounded on
//! `kimberlite-directory`'s `Directory`/`ShardRouter`, generalized from
//! stream placement routing to arbitrary component lifecycle.

mod component;
mod error;
mod events;
mod graph;
mod health;
mod registry;

pub use component::{ComponentEntry, ComponentModule, ComponentState, HealthProbe, PassiveModule};
pub use error::RegistryError;
pub use events::{ComponentStateDto, RegistryEvent, RegistryEventBus};
pub use graph::DependencyGraph;
pub use health::HealthStatus;
pub use registry::Registry;
