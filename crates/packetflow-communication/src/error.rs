use packetflow_types::{ComponentId, MessageId};

#[derive(thiserror::Error, Debug)]
pub enum CommunicationError {
    #[error("message is missing required field '{0}'")]
    MalformedMessage(&'static str),

    #[error("target component {0} does not exist")]
    TargetNotFound(ComponentId),

    #[error("request {0} timed out waiting for a reply")]
    Timeout(MessageId),

    #[error("no healthy components available to route to")]
    NoHealthyComponents,

    #[error("target {component} does not advertise the required capability {capability}")]
    CapabilityNotAdvertised {
        component: ComponentId,
        capability: String,
    },

    #[error("broadcast had {failed} failed deliveries out of {total}")]
    PartialFailure { failed: usize, total: usize },
}
