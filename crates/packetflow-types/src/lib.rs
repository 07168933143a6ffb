//! # packetflow-types
//!
//! Foundation crate: identifiers and small value types shared by every
//! other PacketFlow crate. Nothing here depends on any other `packetflow-*`
//! crate, mirroring the role `kimberlite-types` plays at the base of the
//! `kimberlite` workspace.

mod ids;
mod priority;
mod timestamp;

pub use ids::{
    ComponentId, IntentId, MessageId, RequestId, SessionId, TraceId, UserId,
};
pub use priority::Priority;
pub use timestamp::Timestamp;

/// Deployment environment, used to gate configuration templates and
/// default config loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Dev,
    Test,
    Staging,
    Prod,
}

impl Environment {
    /// Parses from the `PACKETFLOW_ENV`-equivalent environment variable,
    /// falling back to `Dev` on anything unrecognized.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "test" => Self::Test,
            "staging" => Self::Staging,
            "prod" | "production" => Self::Prod,
            _ => Self::Dev,
        }
    }
}
