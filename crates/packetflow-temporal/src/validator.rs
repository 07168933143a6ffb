use chrono::{DateTime, Utc};
use packetflow_capability::{Capability, Constraint, TemporalPattern};
use packetflow_context::{Context, NamedPattern};
use tracing::debug;

use crate::error::TemporalError;
use crate::patterns::PatternEvaluator;

/// Checks a capability's temporal gate against `t`, scoped to the
/// current component (the last hop of `ctx`'s trace, if any) for
/// per-component pattern overrides.
pub struct TemporalValidator {
    evaluator: PatternEvaluator,
}

impl TemporalValidator {
    pub fn new(evaluator: PatternEvaluator) -> Self {
        Self { evaluator }
    }

    /// Validates `cap`'s temporal constraint (if any) at time `t`,
    /// using `ctx`'s trace to resolve per-component pattern overrides.
    /// A non-temporal capability always passes.
    pub fn validate_temporal_capability(
        &self,
        cap: &Capability,
        t: DateTime<Utc>,
        ctx: &Context,
    ) -> Result<(), TemporalError> {
        let component = ctx.trace().last();
        let violation = match cap.constraint() {
            None => return Ok(()),
            Some(Constraint::Window(window)) => (!window.contains(t)).then_some(()),
            Some(Constraint::Pattern(TemporalPattern::BusinessHours)) => self
                .evaluator
                .evaluate(NamedPattern::BusinessHours, component, t)
                .err()
                .map(|_| ()),
            Some(Constraint::Pattern(TemporalPattern::Weekdays)) => self
                .evaluator
                .evaluate(NamedPattern::Weekdays, component, t)
                .err()
                .map(|_| ()),
        };

        match violation {
            None => Ok(()),
            Some(()) => {
                debug!(operation = cap.operation(), %t, "temporal constraint violation");
                Err(TemporalError::ConstraintViolation { operation: cap.operation().to_string() })
            }
        }
    }
}
