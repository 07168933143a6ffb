//! # packetflow-config
//!
//! Two distinct configuration concerns live in this crate:
//!
//! - [`bootstrap`]: process-wide settings read once at startup from
//!   layered sources (defaults → user file → project file → env vars),
//!   grounded directly on `kimberlite-config::ConfigLoader`. This is
//!   where `HEALTH_CHECK_INTERVAL_MS` and friends are resolved.
//! - [`record`]/[`store`]: dynamic, schema-validated, versioned
//!   per-component configuration, managed at runtime by the registry.
//!   This half has no `kimberlite-config` analog (that crate only loads
//!   static files) — it is grounded instead on the immutable-record-
//!   plus-bounded-history idiom in `kimberlite-directory`'s
//!   `ShardMigration`.

mod bootstrap;
mod error;
mod paths;
mod record;
mod schema;
mod store;
mod template;

pub use bootstrap::BootstrapConfig;
pub use error::ConfigError;
pub use paths::Paths;
pub use record::ConfigRecord;
pub use schema::{FieldSchema, FieldType, FieldValidator, Schema, SchemaError, ValidatorOutcome};
pub use store::ConfigStore;
pub use template::ConfigTemplate;
