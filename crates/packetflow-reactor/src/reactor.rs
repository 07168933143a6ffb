use chrono::{DateTime, Utc};
use packetflow_capability::{Authorization, ImplicationGraph};
use packetflow_context::Context;
use packetflow_intent::Intent;
use tracing::debug;

use crate::effect::Effect;
use crate::error::ReactorError;

/// Single-writer, serialized processing of one `(intent, context)` pair
/// against reactor-owned state `S`. Generic over `S` since state shape
/// is reactor-specific (a billing reactor's state has nothing in common
/// with a file-store reactor's), the same reasoning
/// `packetflow_temporal::Scheduler<T>` and `packetflow_plugin::Stage<T>`
/// apply to their own item types.
///
/// Modeled directly on `kimberlite_kernel::apply_committed(state, cmd)
/// -> Result<(State, Vec<Effect>), KernelError>`: state is taken by
/// value (ownership transfer, no cloning on the success path) and
/// capability checks happen before any state read or mutation.
///
/// Invariants implementations must uphold: on error, the state passed
/// in is dropped unused, so the caller's prior state stands; effects
/// are produced only when state actually advances; a reactor that
/// doesn't support `intent.kind` returns `ReactorError::UnsupportedIntent`
/// without touching state.
pub trait Reactor<S>: Send + Sync {
    fn process_intent(&self, intent: &Intent, ctx: &Context, state: S) -> Result<(S, Vec<Effect>), ReactorError>;
}

/// Checks every capability `intent` requires against `ctx`'s held set,
/// plus `ctx`'s own temporal constraints, at time `t`. Intended to be
/// called first in a `Reactor::process_intent` implementation, before
/// any state read or mutation — matching `kernel.rs`'s precondition-
/// checks-before-effects-push ordering.
pub fn authorize_intent(
    ctx: &Context,
    intent: &Intent,
    graph: &ImplicationGraph,
    t: DateTime<Utc>,
) -> Result<(), ReactorError> {
    for required in &intent.capabilities {
        match ctx.capabilities().authorize(graph, required, t) {
            Authorization::Granted => {}
            Authorization::Insufficient => {
                debug!(capability = %required, "insufficient capabilities");
                return Err(ReactorError::InsufficientCapabilities(required.to_string()));
            }
            Authorization::TemporalViolation => {
                debug!(capability = %required, "temporal constraint violation");
                return Err(ReactorError::TemporalConstraintViolation(required.to_string()));
            }
        }
    }

    ctx.validate_temporal_constraints(t)
        .map_err(|violation| ReactorError::TemporalConstraintViolation(format!("{violation:?}")))
}

/// Asserts the pair a `Reactor` impl is about to return obeys the
/// effects-only-on-advance invariant: call with `state_advanced` set to
/// whether `state'` differs from the state passed in. Only active in
/// debug builds, matching `kernel.rs`'s liberal use of `debug_assert!`
/// for postconditions rather than hand-checking in release builds.
pub fn debug_assert_effects_invariant(state_advanced: bool, effects: &[Effect]) {
    debug_assert!(
        state_advanced || effects.is_empty(),
        "effects must only be produced when state advances"
    );
    debug_assert!(
        !state_advanced || !effects.is_empty(),
        "state that advances must produce at least one effect"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use packetflow_capability::Capability;
    use packetflow_intent::{create_intent, IntentIdFactory};
    use packetflow_temporal::FixedClock;
    use packetflow_types::{SessionId, UserId};
    use std::collections::BTreeMap;

    #[derive(Clone, PartialEq, Debug)]
    struct FileState {
        reads: u32,
    }

    struct FileReactor {
        graph: ImplicationGraph,
    }

    impl Reactor<FileState> for FileReactor {
        fn process_intent(
            &self,
            intent: &Intent,
            ctx: &Context,
            state: FileState,
        ) -> Result<(FileState, Vec<Effect>), ReactorError> {
            if intent.kind != "read_file" {
                return Err(ReactorError::UnsupportedIntent(intent.kind.clone()));
            }
            authorize_intent(ctx, intent, &self.graph, Utc::now())?;

            let path = intent.payload.get("path").and_then(|v| v.as_str()).unwrap_or_default();
            let new_state = FileState { reads: state.reads + 1 };
            let effects = vec![Effect::new("read", serde_json::json!({ "path": path }))];
            debug_assert_effects_invariant(new_state != state, &effects);
            Ok((new_state, effects))
        }
    }

    fn ctx_with(caps: Vec<Capability>) -> Context {
        let set = packetflow_capability::CapabilitySet::from_iter(caps);
        Context::builder(UserId::new("u1")).session_id(SessionId::new()).capabilities(set).build().unwrap()
    }

    fn read_intent(path: &str) -> Intent {
        let ids = IntentIdFactory::new();
        let clock = FixedClock::new(Utc::now());
        let mut payload = BTreeMap::new();
        payload.insert("path".to_string(), serde_json::Value::from(path));
        create_intent(&ids, &clock, "read_file", payload, vec![Capability::new("read", path)])
    }

    #[test]
    fn granted_capability_advances_state_and_produces_effects() {
        let reactor = FileReactor { graph: ImplicationGraph::new() };
        let ctx = ctx_with(vec![Capability::new("read", "/x")]);
        let (state, effects) =
            reactor.process_intent(&read_intent("/x"), &ctx, FileState { reads: 0 }).unwrap();
        assert_eq!(state.reads, 1);
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].data["path"], "/x");
    }

    #[test]
    fn missing_capability_is_rejected_before_any_state_change() {
        let reactor = FileReactor { graph: ImplicationGraph::new() };
        let ctx = ctx_with(vec![]);
        let err = reactor.process_intent(&read_intent("/x"), &ctx, FileState { reads: 0 }).unwrap_err();
        assert!(matches!(err, ReactorError::InsufficientCapabilities(_)));
    }

    #[test]
    fn unsupported_intent_type_is_rejected_without_side_effects() {
        let reactor = FileReactor { graph: ImplicationGraph::new() };
        let ctx = ctx_with(vec![Capability::new("read", "/x")]);
        let ids = IntentIdFactory::new();
        let clock = FixedClock::new(Utc::now());
        let other = create_intent(&ids, &clock, "write_file", BTreeMap::new(), vec![]);
        let err = reactor.process_intent(&other, &ctx, FileState { reads: 0 }).unwrap_err();
        assert!(matches!(err, ReactorError::UnsupportedIntent(_)));
    }
}
