use packetflow_types::ComponentId;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum IntentError {
    #[error("no registered component advertises the required capabilities")]
    NoComponentsWithCapability,

    #[error("delegation target '{0}' is not a registered component")]
    TargetProcessorNotFound(ComponentId),

    #[error("conditional composition requires a predicate")]
    MissingPredicate,

    #[error("intent '{0}' failed: {1}")]
    ProcessingFailed(String, String),
}
