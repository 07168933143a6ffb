#[derive(thiserror::Error, Debug)]
pub enum PluginError {
    #[error("plugin '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("plugin '{0}' depends on unregistered plugin '{1}'")]
    MissingDependency(String, String),

    #[error("plugin dependency graph contains a cycle involving '{0}'")]
    DependencyCycle(String),
}
