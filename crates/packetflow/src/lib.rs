//! # PacketFlow
//!
//! A runtime substrate for building capability-secured, intent-driven,
//! stream-capable distributed services: the Intent–Capability–Context–
//! Reactor (ICCR) stack.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                            PacketFlow                            │
//! │ ┌───────────┐  ┌─────────┐  ┌────────┐  ┌─────────┐ ┌─────────┐  │
//! │ │Capability │→ │ Context │→ │ Intent │→ │ Reactor │→│ Stream  │  │
//! │ │(lattice)  │  │(scoped) │  │(route/ │  │(state′, │ │(buffer/ │  │
//! │ │           │  │         │  │ compose)│  │ effects)│ │ window) │  │
//! │ └───────────┘  └─────────┘  └────────┘  └─────────┘ └─────────┘  │
//! │         Registry · Communication · Monitoring · Config           │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use packetflow::PacketFlow;
//!
//! let runtime = PacketFlow::open()?;
//!
//! let intent = runtime.create_intent("deploy", payload, vec![capability]);
//! let ctx = Context::builder(user_id).capabilities(capabilities).build()?;
//! let (intent, target) = runtime.submit_intent(intent, &ctx).await?;
//! // dispatch `intent` to whatever Reactor<S> lives at `target`
//! ```
//!
//! # Modules
//!
//! - **Runtime**: [`PacketFlow`] - the top-level entry point
//! - **Capability/Context/Intent/Reactor/Stream/Temporal**: the ICCR core
//! - **Registry/Communication/Monitoring/Config/Plugin**: component infrastructure

mod error;
mod packetflow;

pub use error::{PacketFlowError, Result};
pub use packetflow::PacketFlow;

// Re-export foundation types
pub use packetflow_types::{
    ComponentId, Environment, IntentId, MessageId, Priority, RequestId, SessionId, Timestamp,
    TraceId, UserId,
};

// Re-export capability algebra
pub use packetflow_capability::{
    Authorization, Capability, CapabilityError, CapabilitySet, Constraint, ImplicationGraph,
    Resource, TemporalPattern, TimeWindow,
};

// Re-export context model
pub use packetflow_context::{
    CompositionStrategy, Context, ContextBuilder, ContextError, NamedPattern, PropagationStrategy,
    TemporalConstraint, TemporalViolation,
};

// Re-export temporal layer
pub use packetflow_temporal::{
    after, before, during, duration, now, overlap, BusinessHours, Clock, FixedClock,
    PatternEvaluator, ScheduleId, ScheduleStatus, ScheduleStrategy, Scheduler, SteppedClock,
    SystemClock, TemporalError, TemporalValidator,
};

// Re-export configuration
pub use packetflow_config::{
    BootstrapConfig, ConfigError, ConfigRecord, ConfigStore, ConfigTemplate, FieldSchema,
    FieldType, FieldValidator, Paths, Schema, SchemaError, ValidatorOutcome,
};

// Re-export component registry & lifecycle
pub use packetflow_registry::{
    ComponentEntry, ComponentModule, ComponentState, ComponentStateDto, DependencyGraph,
    HealthProbe, HealthStatus, PassiveModule, Registry, RegistryError, RegistryEvent,
    RegistryEventBus,
};

// Re-export communication
pub use packetflow_communication::{
    capability_aware, load_balanced, round_robin, route_by_health, BroadcastOutcome,
    CommunicationError, CommunicationHub, Inbox, LatencyStats, Message, MessageKind,
    RouteCandidate, RoutingStrategy, SendOptions,
};

// Re-export monitoring
pub use packetflow_monitoring::{
    Alert, AlertManager, AlertSeverity, BoundedHistory, ComponentSummary, DashboardSnapshot,
    HealthRecord, Monitor, MonitoringError, MonitoringEvent, MonitoringEventBus, MetricsRecord,
    HEALTH_HISTORY_CAP, METRICS_HISTORY_CAP,
};

// Re-export plugin protocol
pub use packetflow_plugin::{resolve_order, Pipeline, PluginError, PluginKind, PluginMetadata, Stage, StageError};

// Re-export intent runtime
pub use packetflow_intent::{
    create_composite_intent, create_intent, delegate, run_composite, Composition, Intent,
    IntentError, IntentIdFactory, IntentMetadata, IntentPipelines, IntentStage, Router,
};

// Re-export reactor core
pub use packetflow_reactor::{authorize_intent, debug_assert_effects_invariant, Effect, Reactor, ReactorError};

// Re-export stream engine
pub use packetflow_stream::{
    AdmitOutcome, BackpressureStrategy, Metrics, MetricsSnapshot, Stream, StreamBuffer,
    StreamConfig, StreamError, Window, WindowStrategy,
};
