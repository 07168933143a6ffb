use std::collections::BTreeMap;
use std::time::Duration;

use packetflow_types::{ComponentId, MessageId, Priority, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The communication shape of a message, independent of its
/// domain-specific `message_type` label (e.g. `"order.created"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Request,
    Response,
    Notification,
    Broadcast,
    Event,
}

/// A routed message. The required-fields set (`id, type, from, to,
/// payload, timestamp`) is enforced by [`Message::validate`], not by
/// the type system, since messages arrive deserialized from external
/// transports and must be checked at that boundary rather than trusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub kind: MessageKind,
    pub message_type: String,
    pub from: ComponentId,
    pub to: ComponentId,
    pub payload: Value,
    #[serde(default)]
    pub priority: Priority,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub timeout: Option<Duration>,
    #[serde(default)]
    pub reply_to: Option<ComponentId>,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl Message {
    pub fn new(
        kind: MessageKind,
        message_type: impl Into<String>,
        from: ComponentId,
        to: ComponentId,
        payload: Value,
    ) -> Self {
        Self {
            id: MessageId::new(),
            kind,
            message_type: message_type.into(),
            from,
            to,
            payload,
            priority: Priority::default(),
            timestamp: Timestamp::new(chrono::Utc::now()),
            timeout: None,
            reply_to: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_request_id(mut self, request_id: MessageId) -> Self {
        self.metadata
            .insert("request_id".to_string(), Value::String(request_id.to_string()));
        self
    }

    pub fn request_id(&self) -> Option<MessageId> {
        self.metadata
            .get("request_id")
            .and_then(Value::as_str)
            .and_then(|s| uuid::Uuid::parse_str(s).ok())
            .map(MessageId::from_uuid)
    }

    /// Validates presence of the fields a transport boundary cannot
    /// guarantee on its own: a non-empty `message_type`. `id`/`kind`/
    /// `from`/`to`/`timestamp` are non-optional in the type itself, so
    /// deserialization already enforces their presence.
    pub fn validate(&self) -> Result<(), crate::error::CommunicationError> {
        if self.message_type.is_empty() {
            return Err(crate::error::CommunicationError::MalformedMessage("type"));
        }
        Ok(())
    }
}
