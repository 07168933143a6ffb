//! # packetflow-communication
//!
//! Message delivery, request/reply with timeout, broadcast, and
//! subscription-based forwarding, plus four routing strategies for
//! picking a target among candidates. Grounded on `kimberlite-vsr`'s
//! message envelope and client-session bookkeeping style.

mod error;
mod hub;
mod message;
mod routing;
mod stats;

pub use error::CommunicationError;
pub use hub::{BroadcastOutcome, CommunicationHub, Inbox, SendOptions};
pub use message::{Message, MessageKind};
pub use routing::{capability_aware, load_balanced, round_robin, route_by_health, RouteCandidate, RoutingStrategy};
pub use stats::LatencyStats;
