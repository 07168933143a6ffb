use std::collections::BTreeMap;

use packetflow_capability::CapabilitySet;
use packetflow_types::{ComponentId, RequestId, SessionId, UserId};
use serde_json::Value;

use crate::constraint::{TemporalConstraint, TemporalViolation};
use crate::error::ContextError;

/// Request-scoped state propagated across components.
///
/// Contexts are immutable value objects: construction happens once via
/// [`ContextBuilder`], and every subsequent operation (`propagate`,
/// `compose`) returns a *new* `Context` rather than mutating in place —
/// the same "builder takes ownership, returns new record" discipline
/// `kimberlite-rbac::AccessPolicy` uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    user_id: UserId,
    session_id: SessionId,
    request_id: RequestId,
    capabilities: CapabilitySet,
    trace: Vec<ComponentId>,
    temporal_constraints: Vec<TemporalConstraint>,
    metadata: BTreeMap<String, Value>,
}

impl Context {
    pub fn builder(user_id: impl Into<UserId>) -> ContextBuilder {
        ContextBuilder::new(user_id)
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn trace(&self) -> &[ComponentId] {
        &self.trace
    }

    pub fn temporal_constraints(&self) -> &[TemporalConstraint] {
        &self.temporal_constraints
    }

    pub fn metadata(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    /// Propagates this context to `target` under `strategy`. Under
    /// `Inherit`, `user_id`/`session_id`/`capabilities` are preserved, a
    /// fresh `request_id` is minted (each propagation hop gets a unique
    /// one), and `target` is appended to the trace. Under `Copy`, the
    /// context is passed through unchanged — `request_id` and `trace` in
    /// particular are preserved, not regenerated.
    pub fn propagate(&self, target: ComponentId, strategy: PropagationStrategy) -> Context {
        match strategy {
            PropagationStrategy::Inherit => {
                let mut trace = self.trace.clone();
                trace.push(target);
                Context {
                    user_id: self.user_id.clone(),
                    session_id: self.session_id.clone(),
                    request_id: RequestId::new(),
                    capabilities: self.capabilities.clone(),
                    trace,
                    temporal_constraints: self.temporal_constraints.clone(),
                    metadata: self.metadata.clone(),
                }
            }
            PropagationStrategy::Copy => self.clone(),
        }
    }

    /// Composes two contexts. Under `Merge`, capabilities
    /// are unioned, traces concatenated, a fresh `request_id` minted, and
    /// `user_id`/`session_id` are taken from `other` (the second
    /// operand). Under `Override`, `other` wins entirely.
    pub fn compose(&self, other: &Context, strategy: CompositionStrategy) -> Context {
        match strategy {
            CompositionStrategy::Override => other.clone(),
            CompositionStrategy::Merge => {
                let mut capabilities = self.capabilities.clone();
                for cap in other.capabilities.iter() {
                    capabilities.grant(cap.clone());
                }

                let mut trace = self.trace.clone();
                trace.extend(other.trace.iter().cloned());

                let mut metadata = self.metadata.clone();
                metadata.extend(other.metadata.clone());

                let mut temporal_constraints = self.temporal_constraints.clone();
                temporal_constraints.extend(other.temporal_constraints.clone());

                Context {
                    user_id: other.user_id.clone(),
                    session_id: other.session_id.clone(),
                    request_id: RequestId::new(),
                    capabilities,
                    trace,
                    temporal_constraints,
                    metadata,
                }
            }
        }
    }

    /// Validates `temporal_constraints` in order against `t`, short-
    /// circuiting on the first violation.
    pub fn validate_temporal_constraints(
        &self,
        t: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), TemporalViolation> {
        for constraint in &self.temporal_constraints {
            constraint.evaluate(t)?;
        }
        Ok(())
    }
}

/// Propagation strategy for [`Context::propagate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationStrategy {
    Inherit,
    Copy,
}

/// Composition strategy for [`Context::compose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionStrategy {
    Merge,
    Override,
}

/// Builder for [`Context`]. `user_id` and `session_id` are required
///; everything else defaults to empty.
pub struct ContextBuilder {
    user_id: UserId,
    session_id: Option<SessionId>,
    request_id: Option<RequestId>,
    capabilities: CapabilitySet,
    trace: Vec<ComponentId>,
    temporal_constraints: Vec<TemporalConstraint>,
    metadata: BTreeMap<String, Value>,
}

impl ContextBuilder {
    fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: None,
            request_id: None,
            capabilities: CapabilitySet::new(),
            trace: Vec::new(),
            temporal_constraints: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn session_id(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn trace(mut self, trace: Vec<ComponentId>) -> Self {
        self.trace = trace;
        self
    }

    pub fn temporal_constraint(mut self, constraint: TemporalConstraint) -> Self {
        self.temporal_constraints.push(constraint);
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn build(self) -> Result<Context, ContextError> {
        let session_id = self
            .session_id
            .ok_or(ContextError::MissingField("session_id"))?;

        Ok(Context {
            user_id: self.user_id,
            session_id,
            request_id: self.request_id.unwrap_or_default(),
            capabilities: self.capabilities,
            trace: self.trace,
            temporal_constraints: self.temporal_constraints,
            metadata: self.metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packetflow_capability::Capability;

    fn ctx(user: &str) -> Context {
        Context::builder(UserId::new(user))
            .session_id(SessionId::new())
            .build()
            .unwrap()
    }

    #[test]
    fn inherit_propagation_mints_new_request_id_and_extends_trace() {
        let c1 = ctx("u1");
        let target = ComponentId::new("stream-router");
        let c2 = c1.propagate(target.clone(), PropagationStrategy::Inherit);

        assert_ne!(c1.request_id(), c2.request_id());
        assert_eq!(c2.trace(), &[target]);
        assert_eq!(c1.user_id(), c2.user_id());
    }

    #[test]
    fn copy_propagation_preserves_request_id_and_trace() {
        let c1 = ctx("u1").propagate(ComponentId::new("a"), PropagationStrategy::Inherit);
        let c2 = c1.propagate(ComponentId::new("b"), PropagationStrategy::Copy);

        assert_eq!(c1.request_id(), c2.request_id());
        assert_eq!(c1.trace(), c2.trace());
    }

    #[test]
    fn merge_composes_capability_union() {
        let mut c1 = ctx("u1");
        c1 = Context {
            capabilities: {
                let mut s = CapabilitySet::new();
                s.grant(Capability::new("read", "/"));
                s
            },
            ..c1
        };
        let mut c2 = ctx("u2");
        c2 = Context {
            capabilities: {
                let mut s = CapabilitySet::new();
                s.grant(Capability::new("write", "/u/"));
                s
            },
            ..c2
        };

        let merged = c1.compose(&c2, CompositionStrategy::Merge);
        assert!(merged.capabilities().contains(&Capability::new("read", "/")));
        assert!(merged.capabilities().contains(&Capability::new("write", "/u/")));
        assert_eq!(merged.capabilities().len(), 2);
    }

    #[test]
    fn override_composition_takes_second_entirely() {
        let c1 = ctx("u1");
        let c2 = ctx("u2");
        let composed = c1.compose(&c2, CompositionStrategy::Override);
        assert_eq!(composed.user_id(), c2.user_id());
        assert_eq!(composed.request_id(), c2.request_id());
    }
}
