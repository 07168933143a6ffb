//! Identifier newtypes.
//!
//! All IDs wrap `uuid::Uuid` except where a component needs a plain
//! human-assigned string (component IDs are names, not UUIDs, since they
//! are chosen at registration time — see `kimberlite-directory`'s
//! `GroupId`, which is likewise a small caller-assigned value, not a
//! generated one).

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random ID.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(RequestId);
uuid_id!(SessionId);
uuid_id!(MessageId);
uuid_id!(TraceId);

/// Identifies an intent. Carries both a UUID (for external addressing)
/// and a process-local monotone sequence number, since intent IDs must
/// be unique and monotone within a process — a v4 UUID alone cannot
/// satisfy the monotonicity half of that invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentId {
    id: Uuid,
    sequence: u64,
}

impl IntentId {
    pub fn new(id: Uuid, sequence: u64) -> Self {
        Self { id, sequence }
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn as_uuid(&self) -> Uuid {
        self.id
    }
}

impl PartialOrd for IntentId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IntentId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sequence.cmp(&other.sequence)
    }
}

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.id, self.sequence)
    }
}

/// Component identity: a caller-assigned name (`"stream-router"`,
/// `"billing-reactor"`), not a generated UUID — components are declared,
/// not spawned anonymously.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ComponentId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A user identity carried by a `Context`. Caller-assigned, same
/// reasoning as `ComponentId`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
