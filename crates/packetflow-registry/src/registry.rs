use std::collections::HashMap;

use chrono::Utc;
use packetflow_types::ComponentId;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::component::{ComponentEntry, ComponentModule, ComponentState};
use crate::error::RegistryError;
use crate::events::{ComponentStateDto, RegistryEvent, RegistryEventBus};
use crate::graph::DependencyGraph;
use crate::health::HealthStatus;

/// Central registry of components: identity, config, dependency graph,
/// health, and lifecycle events. Grounded on `kimberlite-directory`'s
/// `Directory`/`ShardRouter` pair — a placement map plus a dependent
/// graph-aware router — generalized here from stream placement to
/// arbitrary component lifecycle.
pub struct Registry {
    components: HashMap<ComponentId, ComponentEntry>,
    graph: DependencyGraph,
    events: RegistryEventBus,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
            graph: DependencyGraph::new(),
            events: RegistryEventBus::default(),
        }
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<RegistryEvent> {
        self.events.subscribe()
    }

    pub fn register_component(
        &mut self,
        id: ComponentId,
        module: Box<dyn ComponentModule>,
        config: Value,
    ) -> Result<(), RegistryError> {
        if self.components.contains_key(&id) {
            return Err(RegistryError::AlreadyRegistered(id));
        }

        self.graph.register(id.clone());
        self.components.insert(id.clone(), ComponentEntry::new(module, config));
        debug!(component = %id, "registered component");
        self.events.publish(RegistryEvent::ComponentRegistered { id });
        Ok(())
    }

    pub fn unregister_component(&mut self, id: &ComponentId) -> Result<(), RegistryError> {
        if !self.components.contains_key(id) {
            return Err(RegistryError::NotFound(id.clone()));
        }

        let dependents = self.graph.dependents_of(id);
        if !dependents.is_empty() {
            return Err(RegistryError::HasDependents {
                component: id.clone(),
                dependents,
            });
        }

        self.components.remove(id);
        self.graph.unregister(id);
        info!(component = %id, "unregistered component");
        self.events.publish(RegistryEvent::Unregistered { id: id.clone() });
        Ok(())
    }

    pub fn add_component_dependency(
        &mut self,
        from: &ComponentId,
        to: &ComponentId,
    ) -> Result<(), RegistryError> {
        self.require(from)?;
        self.require(to)?;
        self.graph.add_dependency(from, to)?;
        self.events.publish(RegistryEvent::DependencyAdded {
            from: from.clone(),
            to: to.clone(),
        });
        Ok(())
    }

    pub fn remove_component_dependency(&mut self, from: &ComponentId, to: &ComponentId) {
        self.graph.remove_dependency(from, to);
        self.events.publish(RegistryEvent::DependencyRemoved {
            from: from.clone(),
            to: to.clone(),
        });
    }

    pub fn dependencies_of(&self, id: &ComponentId) -> Vec<ComponentId> {
        self.graph.dependencies_of(id)
    }

    pub fn dependents_of(&self, id: &ComponentId) -> Vec<ComponentId> {
        self.graph.dependents_of(id)
    }

    pub fn update_component_state(
        &mut self,
        id: &ComponentId,
        state: ComponentState,
    ) -> Result<(), RegistryError> {
        let entry = self
            .components
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;
        entry.state = state;
        if state == ComponentState::Died {
            warn!(component = %id, "component died");
            self.events.publish(RegistryEvent::Died { id: id.clone() });
        }
        self.events.publish(RegistryEvent::StateUpdated {
            id: id.clone(),
            state: ComponentStateDto::from(state),
        });
        Ok(())
    }

    pub fn update_component_config(
        &mut self,
        id: &ComponentId,
        config: Value,
    ) -> Result<(), RegistryError> {
        let entry = self
            .components
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;
        entry.config = config.clone();
        self.events
            .publish(RegistryEvent::ConfigUpdated { id: id.clone(), config });
        Ok(())
    }

    pub fn heartbeat(&mut self, id: &ComponentId) -> Result<(), RegistryError> {
        self.components
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?
            .heartbeat();
        Ok(())
    }

    pub fn update_load_factor(&mut self, id: &ComponentId, load_factor: f64) -> Result<(), RegistryError> {
        self.components
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?
            .load_factor = load_factor;
        Ok(())
    }

    pub fn load_factor_of(&self, id: &ComponentId) -> Result<f64, RegistryError> {
        Ok(self
            .components
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?
            .load_factor())
    }

    /// Resolves the component's module-reported health if present,
    /// else falls back to a liveness probe based on heartbeat age.
    pub fn check_component_health(&mut self, id: &ComponentId) -> Result<HealthStatus, RegistryError> {
        let status = self
            .components
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?
            .resolve_health(Utc::now());

        self.events.publish(RegistryEvent::HealthUpdated {
            id: id.clone(),
            status,
        });
        Ok(status)
    }

    pub fn metrics_of(&self, id: &ComponentId) -> Result<Value, RegistryError> {
        Ok(self
            .components
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?
            .metrics())
    }

    pub fn config_of(&self, id: &ComponentId) -> Result<&Value, RegistryError> {
        Ok(self
            .components
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?
            .config())
    }

    pub fn state_of(&self, id: &ComponentId) -> Result<ComponentState, RegistryError> {
        Ok(self
            .components
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?
            .state())
    }

    pub fn is_registered(&self, id: &ComponentId) -> bool {
        self.components.contains_key(id)
    }

    pub fn component_ids(&self) -> impl Iterator<Item = &ComponentId> {
        self.components.keys()
    }

    /// Topologically sorts all registered components and returns them
    /// in startup order. Callers are expected to start each component
    /// only after its dependencies report healthy or degraded; the
    /// registry itself does not drive process spawning.
    pub fn start_components_in_order(&self) -> Result<Vec<ComponentId>, RegistryError> {
        self.graph.topological_order()
    }

    fn require(&self, id: &ComponentId) -> Result<(), RegistryError> {
        if self.components.contains_key(id) {
            Ok(())
        } else {
            Err(RegistryError::NotFound(id.clone()))
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::PassiveModule;
    use serde_json::json;

    fn id(name: &str) -> ComponentId {
        ComponentId::new(name)
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = Registry::new();
        registry
            .register_component(id("a"), Box::new(PassiveModule), json!({}))
            .unwrap();
        let err = registry
            .register_component(id("a"), Box::new(PassiveModule), json!({}))
            .unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyRegistered(_)));
    }

    #[test]
    fn unregister_with_dependents_is_rejected() {
        let mut registry = Registry::new();
        registry
            .register_component(id("a"), Box::new(PassiveModule), json!({}))
            .unwrap();
        registry
            .register_component(id("b"), Box::new(PassiveModule), json!({}))
            .unwrap();
        registry.add_component_dependency(&id("a"), &id("b")).unwrap();

        let err = registry.unregister_component(&id("b")).unwrap_err();
        assert!(matches!(err, RegistryError::HasDependents { .. }));
    }

    #[test]
    fn fresh_component_reports_healthy() {
        let mut registry = Registry::new();
        registry
            .register_component(id("a"), Box::new(PassiveModule), json!({}))
            .unwrap();
        let status = registry.check_component_health(&id("a")).unwrap();
        assert_eq!(status, HealthStatus::Healthy);
    }

    #[test]
    fn startup_order_respects_dependency_graph() {
        let mut registry = Registry::new();
        registry
            .register_component(id("db"), Box::new(PassiveModule), json!({}))
            .unwrap();
        registry
            .register_component(id("api"), Box::new(PassiveModule), json!({}))
            .unwrap();
        registry.add_component_dependency(&id("api"), &id("db")).unwrap();

        let order = registry.start_components_in_order().unwrap();
        let db_pos = order.iter().position(|x| *x == id("db")).unwrap();
        let api_pos = order.iter().position(|x| *x == id("api")).unwrap();
        assert!(db_pos < api_pos);
    }
}
