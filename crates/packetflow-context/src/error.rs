/// Errors surfaced while constructing or composing contexts.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("context is missing required field: {0}")]
    MissingField(&'static str),
}
