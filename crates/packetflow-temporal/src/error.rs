#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TemporalError {
    #[error("temporal constraint violation for capability '{operation}'")]
    ConstraintViolation { operation: String },
}
