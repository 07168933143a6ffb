use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use packetflow_capability::{Capability, ImplicationGraph};
use packetflow_communication::CommunicationHub;
use packetflow_config::{BootstrapConfig, ConfigStore};
use packetflow_context::Context;
use packetflow_intent::{create_intent, Intent, IntentIdFactory, IntentPipelines, Router};
use packetflow_monitoring::Monitor;
use packetflow_reactor::authorize_intent;
use packetflow_registry::{ComponentModule, Registry};
use packetflow_temporal::{Clock, SystemClock};
use packetflow_types::ComponentId;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::{PacketFlowError, Result};

/// Process-wide PacketFlow runtime: the shared registry, monitor,
/// communication hub, and config store every component is wired
/// against, plus the capability graph and intent plumbing
/// (`Router`/`IntentPipelines`/`IntentIdFactory`) that turns an inbound
/// intent into a routed, authorized one.
///
/// Mirrors `kimberlite::Kimberlite`'s role as the SDK-layer entry point
/// gluing together independently-testable crates, but does not itself
/// run a `Reactor<S>` — state shape is reactor-specific, so a reactor's
/// owner calls `process_intent` directly once `submit_intent` hands
/// back the routed target and authorized intent.
pub struct PacketFlow {
    bootstrap: BootstrapConfig,
    registry: Arc<Mutex<Registry>>,
    monitor: Arc<Monitor>,
    communication: Mutex<CommunicationHub>,
    config_store: Mutex<ConfigStore>,
    capability_graph: ImplicationGraph,
    intent_router: Mutex<Router>,
    intent_pipelines: IntentPipelines,
    intent_ids: IntentIdFactory,
    clock: Arc<dyn Clock>,
}

impl PacketFlow {
    /// Loads [`BootstrapConfig`] from the process's default layered
    /// sources and builds a runtime around it.
    pub fn open() -> Result<Self> {
        Self::open_with_config(BootstrapConfig::load()?)
    }

    pub fn open_with_config(bootstrap: BootstrapConfig) -> Self {
        let registry = Arc::new(Mutex::new(Registry::new()));
        let monitor = Arc::new(Monitor::new(
            Arc::clone(&registry),
            bootstrap.health_check_interval_ms,
            bootstrap.metrics_collection_interval_ms,
        ));

        Self {
            bootstrap,
            registry,
            monitor,
            communication: Mutex::new(CommunicationHub::new()),
            config_store: Mutex::new(ConfigStore::new()),
            capability_graph: ImplicationGraph::new(),
            intent_router: Mutex::new(Router::new()),
            intent_pipelines: IntentPipelines::new(Vec::new(), Vec::new()),
            intent_ids: IntentIdFactory::new(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Builds a runtime with caller-supplied validation/transformation
    /// stages and capability implication graph, since those are
    /// ordinarily assembled once at process startup from
    /// domain-specific plugins.
    pub fn with_components(
        bootstrap: BootstrapConfig,
        capability_graph: ImplicationGraph,
        intent_pipelines: IntentPipelines,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut runtime = Self::open_with_config(bootstrap);
        runtime.capability_graph = capability_graph;
        runtime.intent_pipelines = intent_pipelines;
        runtime.clock = clock;
        runtime
    }

    pub fn registry(&self) -> &Arc<Mutex<Registry>> {
        &self.registry
    }

    pub fn monitor(&self) -> &Arc<Monitor> {
        &self.monitor
    }

    pub fn communication(&self) -> &Mutex<CommunicationHub> {
        &self.communication
    }

    pub fn config_store(&self) -> &Mutex<ConfigStore> {
        &self.config_store
    }

    pub fn capability_graph(&self) -> &ImplicationGraph {
        &self.capability_graph
    }

    pub fn bootstrap(&self) -> &BootstrapConfig {
        &self.bootstrap
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Registers a component against the shared registry and, when it
    /// advertises capabilities, the intent router in the same step —
    /// the two would otherwise need to be kept in sync by hand.
    pub async fn register_component(
        &self,
        id: ComponentId,
        module: Box<dyn ComponentModule>,
        config: Value,
        advertises: Option<packetflow_capability::CapabilitySet>,
    ) -> Result<()> {
        self.registry.lock().await.register_component(id.clone(), module, config)?;
        if let Some(capabilities) = advertises {
            self.intent_router.lock().await.register_capability_provider(id, capabilities);
        }
        Ok(())
    }

    /// Registers an explicit `{intent type -> component}` route,
    /// overriding capability-based matching for that type.
    pub async fn register_intent_route(&self, intent_type: impl Into<String>, component: ComponentId) {
        self.intent_router.lock().await.register_type_route(intent_type, component);
    }

    /// Constructs a new intent, stamping `metadata.id`/`created_at`
    /// from this runtime's id factory and clock.
    pub fn create_intent(
        &self,
        kind: impl Into<String>,
        payload: BTreeMap<String, Value>,
        capabilities: Vec<Capability>,
    ) -> Intent {
        create_intent(&self.intent_ids, self.clock.as_ref(), kind, payload, capabilities)
    }

    /// Runs the inbound data flow up to (not including) reactor
    /// processing: **validate** → **transform** → **check capabilities
    /// against context** → **route**. Returns the validated/transformed
    /// intent and the component it was routed to; the caller applies
    /// the intent to whatever `Reactor<S>` instance lives at that
    /// component.
    pub async fn submit_intent(&self, intent: Intent, ctx: &Context) -> Result<(Intent, ComponentId)> {
        let intent = self.intent_pipelines.run(intent)?;
        authorize_intent(ctx, &intent, &self.capability_graph, self.clock.now())?;
        let target = self.intent_router.lock().await.route(&intent, &*self.registry.lock().await)?;
        Ok((intent, target))
    }

    /// Rewrites `intent.metadata.delegated_to`, failing if `target`
    /// isn't a live registry entry.
    pub async fn delegate_intent(&self, intent: &Intent, target: ComponentId) -> Result<Intent> {
        let registry = self.registry.lock().await;
        Ok(packetflow_intent::delegate(intent, target, &registry)?)
    }
}
