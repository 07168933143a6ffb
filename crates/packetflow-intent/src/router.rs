use std::cmp::Ordering;
use std::collections::HashMap;

use packetflow_capability::CapabilitySet;
use packetflow_registry::Registry;
use packetflow_types::ComponentId;

use crate::error::IntentError;
use crate::intent::Intent;

/// Routes intents to a target component: an explicit `{type -> component}`
/// table takes precedence, falling back to capability matching (any
/// registered provider whose advertised set covers every capability the
/// intent requires). Ties among capability-matched candidates break by
/// lowest `load_factor` (read from the shared [`Registry`]) then
/// lexicographic component id.
///
/// Grounded on `kimberlite-directory`'s `ShardRouter`: a small owned map
/// plus a deterministic tie-break rule, generalized from shard placement
/// to intent dispatch.
#[derive(Default)]
pub struct Router {
    routes_by_type: HashMap<String, ComponentId>,
    capability_providers: Vec<(ComponentId, CapabilitySet)>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_type_route(&mut self, intent_type: impl Into<String>, component: ComponentId) {
        self.routes_by_type.insert(intent_type.into(), component);
    }

    pub fn register_capability_provider(&mut self, component: ComponentId, capabilities: CapabilitySet) {
        self.capability_providers.retain(|(id, _)| *id != component);
        self.capability_providers.push((component, capabilities));
    }

    /// Routes `intent` to a target component. Explicit type routes win
    /// outright; otherwise candidates are drawn from providers whose
    /// advertised capabilities are a superset of `intent.capabilities`.
    pub fn route(&self, intent: &Intent, registry: &Registry) -> Result<ComponentId, IntentError> {
        if let Some(target) = self.routes_by_type.get(&intent.kind) {
            return Ok(target.clone());
        }

        let mut candidates: Vec<&ComponentId> = self
            .capability_providers
            .iter()
            .filter(|(_, caps)| intent.capabilities.iter().all(|required| caps.contains(required)))
            .map(|(id, _)| id)
            .collect();

        if candidates.is_empty() {
            return Err(IntentError::NoComponentsWithCapability);
        }

        candidates.sort_by(|a, b| {
            let load_a = registry.load_factor_of(a).unwrap_or(f64::MAX);
            let load_b = registry.load_factor_of(b).unwrap_or(f64::MAX);
            load_a.partial_cmp(&load_b).unwrap_or(Ordering::Equal).then_with(|| a.as_str().cmp(b.as_str()))
        });

        Ok(candidates[0].clone())
    }
}

/// Rewrites `intent`'s `metadata.delegated_to` to `target`, failing if
/// `target` isn't a live registry entry.
pub fn delegate(intent: &Intent, target: ComponentId, registry: &Registry) -> Result<Intent, IntentError> {
    if !registry.is_registered(&target) {
        return Err(IntentError::TargetProcessorNotFound(target));
    }
    Ok(intent.with_delegated_to(target))
}
