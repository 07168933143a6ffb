use packetflow_types::ComponentId;

#[derive(thiserror::Error, Debug)]
pub enum MonitoringError {
    #[error("component {0} is not tracked by the monitor")]
    ComponentNotFound(ComponentId),
}
