/// Errors surfaced by the capability algebra.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// No capability in the presented set implies the required one.
    #[error("insufficient capabilities: required {required}")]
    InsufficientCapabilities { required: String },

    /// Implication holds but the capability's temporal window rejects `t`.
    #[error("temporal constraint violation for capability {capability}")]
    TemporalConstraintViolation { capability: String },

    /// Registering an implication edge would create a cycle.
    #[error("implication cycle detected introducing {parent} -> {child}")]
    ImplicationCycle { parent: String, child: String },
}
