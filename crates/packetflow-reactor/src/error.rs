#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ReactorError {
    #[error("insufficient capabilities for '{0}'")]
    InsufficientCapabilities(String),

    #[error("reactor does not support intent type '{0}'")]
    UnsupportedIntent(String),

    #[error("temporal constraint violation for '{0}'")]
    TemporalConstraintViolation(String),

    #[error("{0}")]
    Domain(String),
}
