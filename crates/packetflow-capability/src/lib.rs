//! # packetflow-capability
//!
//! Capability values and the implication lattice that backs every
//! authorization decision in PacketFlow. Grounded on `kimberlite-rbac`'s
//! `Permission`/`PermissionSet` pair, generalized from a closed `enum
//! Permission` to an open `{operation, resource}` pair with a declared,
//! cycle-checked implication graph.
//!
//! ```
//! use packetflow_capability::{Capability, ImplicationGraph};
//!
//! let mut graph = ImplicationGraph::new();
//! graph.register("admin", ["read", "write", "delete"]).unwrap();
//! graph.register("write", ["read"]).unwrap();
//!
//! let admin = Capability::new("admin", "*");
//! let read = Capability::new("read", "/users/42");
//!
//! assert!(graph.implies(&admin, &read));
//! assert!(!graph.implies(&read, &admin));
//! ```

mod capability;
mod constraint;
mod error;
mod graph;
mod set;

pub use capability::{Capability, Constraint, Resource};
pub use constraint::{TemporalPattern, TimeWindow};
pub use error::CapabilityError;
pub use graph::ImplicationGraph;
pub use set::{Authorization, CapabilitySet};
