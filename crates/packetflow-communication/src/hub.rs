use std::collections::HashMap;
use std::time::{Duration, Instant};

use indexmap::IndexSet;
use packetflow_types::{ComponentId, MessageId};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, warn};

use crate::error::CommunicationError;
use crate::message::{Message, MessageKind};
use crate::stats::LatencyStats;

pub type Inbox = mpsc::UnboundedSender<Message>;

#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub timeout: Option<Duration>,
}

/// Result of a [`CommunicationHub::broadcast_message`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastOutcome {
    pub total: usize,
    pub failed: usize,
}

/// Message delivery, request/reply, broadcast, and subscription hub.
/// Grounded on `kimberlite-vsr`'s client-session/message-envelope
/// split: a registered-inbox map stands in for VSR's replica transport,
/// and pending requests use the same "map keyed by id, timer purges on
/// expiry" shape as `kimberlite-vsr::client_sessions`' retry handling,
/// simplified from session-scoped to per-request.
pub struct CommunicationHub {
    inboxes: HashMap<ComponentId, Inbox>,
    subscriptions: HashMap<ComponentId, IndexSet<ComponentId>>,
    pending: Mutex<HashMap<MessageId, oneshot::Sender<Message>>>,
    stats: Mutex<LatencyStats>,
}

impl CommunicationHub {
    pub fn new() -> Self {
        Self {
            inboxes: HashMap::new(),
            subscriptions: HashMap::new(),
            pending: Mutex::new(HashMap::new()),
            stats: Mutex::new(LatencyStats::new()),
        }
    }

    pub fn register_inbox(&mut self, id: ComponentId, inbox: Inbox) {
        self.inboxes.insert(id, inbox);
    }

    pub fn unregister_inbox(&mut self, id: &ComponentId) {
        self.inboxes.remove(id);
    }

    /// `subscribe(from, to)`: `from` receives a copy of every message
    /// subsequently delivered to `to`.
    pub fn subscribe(&mut self, from: ComponentId, to: ComponentId) {
        self.subscriptions.entry(to).or_default().insert(from);
    }

    pub async fn send_message(
        &self,
        to: &ComponentId,
        message_type: impl Into<String>,
        from: ComponentId,
        payload: Value,
    ) -> Result<(), CommunicationError> {
        let message = Message::new(MessageKind::Notification, message_type, from, to.clone(), payload);
        self.deliver(message)
    }

    /// `send_request`: delivers the message then blocks on a reply
    /// keyed by message id, identified on the reply side by
    /// `metadata.request_id`. Times out and purges the pending entry on
    /// expiry, matching a fixed default of 5 seconds unless overridden.
    pub async fn send_request(
        &self,
        to: &ComponentId,
        message_type: impl Into<String>,
        from: ComponentId,
        payload: Value,
        opts: SendOptions,
    ) -> Result<Message, CommunicationError> {
        let message = Message::new(MessageKind::Request, message_type, from, to.clone(), payload);
        let request_id = message.id;

        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(request_id, tx);

        let started = Instant::now();
        self.deliver(message)?;

        let timeout = opts.timeout.unwrap_or(Duration::from_secs(5));
        let result = tokio::time::timeout(timeout, rx).await;

        match result {
            Ok(Ok(reply)) => {
                self.stats.lock().await.record(to, started.elapsed());
                Ok(reply)
            }
            Ok(Err(_)) | Err(_) => {
                self.pending.lock().await.remove(&request_id);
                warn!(%request_id, target = %to, "request timed out");
                Err(CommunicationError::Timeout(request_id))
            }
        }
    }

    /// Delivers a reply: if it carries a `request_id` matching a
    /// pending request, completes that request instead of treating it
    /// as a fresh inbound message.
    pub fn complete_reply(&self, reply: Message) -> bool {
        if let Some(request_id) = reply.request_id() {
            if let Ok(mut pending) = self.pending.try_lock() {
                if let Some(tx) = pending.remove(&request_id) {
                    let _ = tx.send(reply);
                    return true;
                }
            }
        }
        false
    }

    /// `broadcast_message`: best-effort fan-out, returning the count of
    /// failed deliveries rather than failing the whole call on the
    /// first unreachable target.
    pub fn broadcast_message(
        &self,
        targets: &[ComponentId],
        message_type: impl Into<String> + Clone,
        from: ComponentId,
        payload: Value,
    ) -> BroadcastOutcome {
        let mut failed = 0;
        for target in targets {
            let message = Message::new(
                MessageKind::Broadcast,
                message_type.clone(),
                from.clone(),
                target.clone(),
                payload.clone(),
            );
            if self.deliver(message).is_err() {
                failed += 1;
            }
        }
        BroadcastOutcome {
            total: targets.len(),
            failed,
        }
    }

    pub async fn average_latency_ms(&self, target: &ComponentId) -> Option<f64> {
        self.stats.lock().await.average_ms(target)
    }

    fn deliver(&self, message: Message) -> Result<(), CommunicationError> {
        message.validate()?;

        let inbox = self
            .inboxes
            .get(&message.to)
            .ok_or_else(|| CommunicationError::TargetNotFound(message.to.clone()))?;

        if let Some(subscribers) = self.subscriptions.get(&message.to) {
            for subscriber in subscribers {
                if let Some(sub_inbox) = self.inboxes.get(subscriber) {
                    let _ = sub_inbox.send(message.clone());
                }
            }
        }

        debug!(to = %message.to, message_type = %message.message_type, "delivering message");
        inbox
            .send(message)
            .map_err(|e| CommunicationError::TargetNotFound(e.0.to))
    }
}

impl Default for CommunicationHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_message_to_unregistered_target_fails() {
        let hub = CommunicationHub::new();
        let result = hub
            .send_message(
                &ComponentId::new("ghost"),
                "ping",
                ComponentId::new("caller"),
                serde_json::json!({}),
            )
            .await;
        assert!(matches!(result, Err(CommunicationError::TargetNotFound(_))));
    }

    #[tokio::test]
    async fn send_message_delivers_to_registered_inbox() {
        let mut hub = CommunicationHub::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        hub.register_inbox(ComponentId::new("worker"), tx);

        hub.send_message(
            &ComponentId::new("worker"),
            "ping",
            ComponentId::new("caller"),
            serde_json::json!({"n": 1}),
        )
        .await
        .unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.message_type, "ping");
    }

    #[tokio::test]
    async fn subscriber_receives_copy_of_delivered_message() {
        let mut hub = CommunicationHub::new();
        let (worker_tx, mut worker_rx) = mpsc::unbounded_channel();
        let (watcher_tx, mut watcher_rx) = mpsc::unbounded_channel();
        hub.register_inbox(ComponentId::new("worker"), worker_tx);
        hub.register_inbox(ComponentId::new("watcher"), watcher_tx);
        hub.subscribe(ComponentId::new("watcher"), ComponentId::new("worker"));

        hub.send_message(
            &ComponentId::new("worker"),
            "ping",
            ComponentId::new("caller"),
            serde_json::json!({}),
        )
        .await
        .unwrap();

        assert!(worker_rx.recv().await.is_some());
        assert!(watcher_rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn send_request_times_out_when_no_reply_arrives() {
        let mut hub = CommunicationHub::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        hub.register_inbox(ComponentId::new("worker"), tx);

        let result = hub
            .send_request(
                &ComponentId::new("worker"),
                "compute",
                ComponentId::new("caller"),
                serde_json::json!({}),
                SendOptions {
                    timeout: Some(Duration::from_millis(20)),
                },
            )
            .await;

        assert!(matches!(result, Err(CommunicationError::Timeout(_))));
    }

    #[tokio::test]
    async fn broadcast_reports_failed_count_for_missing_targets() {
        let mut hub = CommunicationHub::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        hub.register_inbox(ComponentId::new("worker"), tx);

        let outcome = hub.broadcast_message(
            &[ComponentId::new("worker"), ComponentId::new("ghost")],
            "ping",
            ComponentId::new("caller"),
            serde_json::json!({}),
        );

        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.failed, 1);
    }
}
