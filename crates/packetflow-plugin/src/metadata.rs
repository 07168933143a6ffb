use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The subsystem a plugin extends. Each kind corresponds to a pipeline
/// elsewhere in the workspace (capability checks, intent validation,
/// context composition, reactor processing, stream windowing, temporal
/// scheduling) plus three cross-cutting kinds for surfaces outside the
/// core runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginKind {
    Capability,
    Intent,
    Context,
    Reactor,
    Stream,
    Temporal,
    Web,
    Test,
    Docs,
}

/// Metadata a plugin advertises at registration. `priority` governs
/// pipeline ordering (higher runs first); `dependencies` names other
/// plugins (by `name`) that must be registered first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginMetadata {
    pub name: String,
    pub version: String,
    pub kind: PluginKind,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub default_config: Value,
    #[serde(default)]
    pub priority: i32,
}

impl PluginMetadata {
    pub fn new(name: impl Into<String>, version: impl Into<String>, kind: PluginKind) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            kind,
            dependencies: Vec::new(),
            default_config: Value::Null,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_default_config(mut self, default_config: Value) -> Self {
        self.default_config = default_config;
        self
    }
}
