use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use packetflow_capability::Capability;
use packetflow_types::{ComponentId, IntentId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// The composition strategy carried by a composite intent. Execution
/// semantics for each variant live in [`crate::composition`]; this enum
/// is just the declared shape, kept serializable with the rest of
/// `Intent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Composition {
    Sequential,
    Parallel,
    Conditional,
    Pipeline,
    FanOut,
}

/// Metadata carried on every intent: identity, creation time, and
/// whatever a reactor or the runtime stamps onto it afterward
/// (`delegated_to` in particular).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentMetadata {
    pub id: IntentId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub delegated_to: Option<ComponentId>,
    #[serde(default)]
    pub extra: BTreeMap<String, Value>,
}

/// A declarative request for work, with required capabilities and a
/// payload, routed to a reactor. Immutable: every transformation
/// (`with_payload`, `delegate`, pipeline stages) returns a new `Intent`.
///
/// Matches `kimberlite-kernel::Command`'s role as the immutable value a
/// pure processing step consumes, generalized from a closed `enum`
/// (fixed command set) to an open `{type, payload}` pair plus
/// capabilities, since reactors are user-defined and not known to this
/// crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: BTreeMap<String, Value>,
    pub capabilities: Vec<Capability>,
    pub metadata: IntentMetadata,
    #[serde(default)]
    pub intents: Vec<Intent>,
    #[serde(default)]
    pub composition: Option<Composition>,
}

impl Intent {
    pub fn is_composite(&self) -> bool {
        self.composition.is_some()
    }

    /// Returns a copy of this intent with `key` set in its payload,
    /// used by pipeline composition to thread the previous result
    /// forward as an added `context` key.
    pub fn with_payload_entry(&self, key: impl Into<String>, value: Value) -> Intent {
        let mut payload = self.payload.clone();
        payload.insert(key.into(), value);
        Intent { payload, ..self.clone() }
    }

    /// Rewrites `metadata.delegated_to`, used by [`crate::router::delegate`].
    pub fn with_delegated_to(&self, target: ComponentId) -> Intent {
        let mut metadata = self.metadata.clone();
        metadata.delegated_to = Some(target);
        Intent { metadata, ..self.clone() }
    }
}

/// Process-local monotone sequence counter backing [`IntentId`], since a
/// v4 UUID alone isn't ordered. One counter per process, shared by every
/// `create_intent` call — mirrors `kimberlite-kernel`'s preference for a
/// single source of monotonicity rather than per-caller counters.
#[derive(Default)]
pub struct IntentIdFactory {
    next_sequence: std::sync::atomic::AtomicU64,
}

impl IntentIdFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> IntentId {
        let sequence = self.next_sequence.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        IntentId::new(Uuid::new_v4(), sequence)
    }
}

/// Constructs a plain (non-composite) intent, stamping `metadata.id` and
/// `metadata.created_at` via `ids` and `clock` rather than a bare
/// `SystemTime::now()` call, so creation stays deterministically
/// testable — pushing clock access to the runtime boundary the way
/// `kimberlite-kernel` keeps the kernel itself clock-free.
pub fn create_intent(
    ids: &IntentIdFactory,
    clock: &dyn packetflow_temporal::Clock,
    kind: impl Into<String>,
    payload: BTreeMap<String, Value>,
    capabilities: Vec<Capability>,
) -> Intent {
    Intent {
        kind: kind.into(),
        payload,
        capabilities,
        metadata: IntentMetadata {
            id: ids.next(),
            created_at: clock.now(),
            delegated_to: None,
            extra: BTreeMap::new(),
        },
        intents: Vec::new(),
        composition: None,
    }
}

/// Constructs a composite intent wrapping `intents` under `composition`.
/// Its own `capabilities`/`payload` are typically empty; the composition
/// executor reads from the nested intents, not the wrapper.
pub fn create_composite_intent(
    ids: &IntentIdFactory,
    clock: &dyn packetflow_temporal::Clock,
    kind: impl Into<String>,
    intents: Vec<Intent>,
    composition: Composition,
) -> Intent {
    Intent {
        kind: kind.into(),
        payload: BTreeMap::new(),
        capabilities: Vec::new(),
        metadata: IntentMetadata {
            id: ids.next(),
            created_at: clock.now(),
            delegated_to: None,
            extra: BTreeMap::new(),
        },
        intents,
        composition: Some(composition),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packetflow_temporal::FixedClock;

    fn clock() -> FixedClock {
        FixedClock::new(Utc::now())
    }

    #[test]
    fn create_intent_stamps_id_and_created_at_from_injected_clock() {
        let ids = IntentIdFactory::new();
        let c = clock();
        let intent = create_intent(&ids, &c, "read", BTreeMap::new(), vec![]);
        assert_eq!(intent.metadata.created_at, c.now());
        assert_eq!(intent.metadata.id.sequence(), 0);
    }

    #[test]
    fn intent_ids_are_monotone_within_a_process() {
        let ids = IntentIdFactory::new();
        let c = clock();
        let a = create_intent(&ids, &c, "read", BTreeMap::new(), vec![]);
        let b = create_intent(&ids, &c, "read", BTreeMap::new(), vec![]);
        assert!(a.metadata.id < b.metadata.id);
    }

    #[test]
    fn with_payload_entry_does_not_mutate_the_original() {
        let ids = IntentIdFactory::new();
        let c = clock();
        let original = create_intent(&ids, &c, "read", BTreeMap::new(), vec![]);
        let updated = original.with_payload_entry("context", Value::from(1));
        assert!(original.payload.is_empty());
        assert_eq!(updated.payload.get("context"), Some(&Value::from(1)));
    }
}
