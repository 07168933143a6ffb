#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StreamError {
    #[error("insufficient capabilities to process this event")]
    InsufficientCapabilities,

    #[error("temporal constraint violation")]
    TemporalConstraintViolation,

    #[error("{0}")]
    Domain(String),
}
