use std::path::PathBuf;

/// Errors surfaced by bootstrap config loading and the dynamic config
/// store.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    ReadError { path: PathBuf, source: std::io::Error },

    #[error("failed to load layered configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("failed to determine XDG directory")]
    XdgUnavailable,

    #[error("schema not found for component {0}")]
    SchemaNotFound(String),

    #[error("validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<String> },

    #[error("component {0} is not registered")]
    ComponentNotFound(String),

    #[error("config version {version} not found for component {component}")]
    VersionNotFound { component: String, version: String },

    #[error("template {name} is not applicable in environment {environment:?}")]
    TemplateNotForEnvironment {
        name: String,
        environment: packetflow_types::Environment,
    },

    #[error("template {0} not found")]
    TemplateNotFound(String),

    #[error("invalid JSON import: {0}")]
    InvalidImport(String),
}
