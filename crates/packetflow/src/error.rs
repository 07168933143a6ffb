/// Top-level error aggregating every layer's error type behind one
/// `?`-friendly enum, the same role `kimberlite::KimberliteError` plays
/// over its own layered crates.
#[derive(thiserror::Error, Debug)]
pub enum PacketFlowError {
    #[error(transparent)]
    Capability(#[from] packetflow_capability::CapabilityError),

    #[error(transparent)]
    Context(#[from] packetflow_context::ContextError),

    #[error(transparent)]
    Temporal(#[from] packetflow_temporal::TemporalError),

    #[error(transparent)]
    Config(#[from] packetflow_config::ConfigError),

    #[error(transparent)]
    Registry(#[from] packetflow_registry::RegistryError),

    #[error(transparent)]
    Communication(#[from] packetflow_communication::CommunicationError),

    #[error(transparent)]
    Monitoring(#[from] packetflow_monitoring::MonitoringError),

    #[error(transparent)]
    Plugin(#[from] packetflow_plugin::PluginError),

    #[error(transparent)]
    Stage(#[from] packetflow_plugin::StageError),

    #[error(transparent)]
    Intent(#[from] packetflow_intent::IntentError),

    #[error(transparent)]
    Reactor(#[from] packetflow_reactor::ReactorError),

    #[error(transparent)]
    Stream(#[from] packetflow_stream::StreamError),
}

pub type Result<T> = std::result::Result<T, PacketFlowError>;
