use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A side effect a reactor wants the runtime to execute after state
/// advances — a read, a write, a notification, whatever the reactor's
/// domain calls for. Open `{kind, data}` shape rather than a closed enum
/// since effect vocabularies are reactor-specific, matching `Intent`'s
/// own open `{type, payload}` shape.
///
/// Grounded on `kimberlite-kernel::Effect`'s role as the kernel's only
/// channel to the outside world, generalized from a fixed enum (closed
/// over one storage engine's effect types) to an open one (reactors are
/// user-defined here, not known to this crate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: String,
    pub data: Value,
}

impl Effect {
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self { kind: kind.into(), data }
    }
}
