use std::hash::{Hash, Hasher};

use packetflow_registry::HealthStatus;
use packetflow_types::{ComponentId, MessageId};

use crate::error::CommunicationError;

/// A routable component as seen by the router: just enough state to
/// pick a target, independent of the registry's internal bookkeeping.
#[derive(Debug, Clone)]
pub struct RouteCandidate {
    pub id: ComponentId,
    pub load_factor: f64,
    pub advertised_capabilities: Vec<String>,
    pub health: HealthStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingStrategy {
    RoundRobin,
    LoadBalanced,
    CapabilityAware,
    RouteByHealth,
}

/// `round_robin`: deterministic index derived from hashing the message
/// id, so repeated routing of the same message always lands on the
/// same candidate (useful for retries) while different messages spread
/// across candidates.
pub fn round_robin<'a>(
    candidates: &'a [RouteCandidate],
    message_id: MessageId,
) -> Option<&'a RouteCandidate> {
    if candidates.is_empty() {
        return None;
    }
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    message_id.as_uuid().hash(&mut hasher);
    let index = (hasher.finish() as usize) % candidates.len();
    candidates.get(index)
}

/// `load_balanced`: the candidate with the lowest `load_factor`.
pub fn load_balanced(candidates: &[RouteCandidate]) -> Option<&RouteCandidate> {
    candidates
        .iter()
        .min_by(|a, b| a.load_factor.total_cmp(&b.load_factor))
}

/// `capability_aware`: restricts to candidates advertising the
/// required capability before applying load balancing.
pub fn capability_aware<'a>(
    candidates: &'a [RouteCandidate],
    required_capability: &str,
) -> Result<&'a RouteCandidate, CommunicationError> {
    let eligible: Vec<&RouteCandidate> = candidates
        .iter()
        .filter(|c| c.advertised_capabilities.iter().any(|cap| cap == required_capability))
        .collect();

    eligible
        .into_iter()
        .min_by(|a, b| a.load_factor.total_cmp(&b.load_factor))
        .ok_or_else(|| CommunicationError::CapabilityNotAdvertised {
            component: candidates
                .first()
                .map(|c| c.id.clone())
                .unwrap_or_else(|| ComponentId::new("unknown")),
            capability: required_capability.to_string(),
        })
}

/// `route_by_health`: filters to `healthy`/`degraded` candidates, then
/// load-balances among them. An empty healthy set is an explicit error
/// rather than an empty `Option`, since the caller needs to distinguish
/// "no candidates at all" from "candidates exist but none are up".
pub fn route_by_health(candidates: &[RouteCandidate]) -> Result<&RouteCandidate, CommunicationError> {
    let routable: Vec<&RouteCandidate> = candidates
        .iter()
        .filter(|c| c.health.is_routable())
        .collect();

    routable
        .into_iter()
        .min_by(|a, b| a.load_factor.total_cmp(&b.load_factor))
        .ok_or(CommunicationError::NoHealthyComponents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, load: f64, health: HealthStatus) -> RouteCandidate {
        RouteCandidate {
            id: ComponentId::new(name),
            load_factor: load,
            advertised_capabilities: vec!["process:orders".to_string()],
            health,
        }
    }

    #[test]
    fn round_robin_is_deterministic_for_same_message_id() {
        let candidates = vec![
            candidate("a", 0.0, HealthStatus::Healthy),
            candidate("b", 0.0, HealthStatus::Healthy),
        ];
        let message_id = MessageId::new();
        let first = round_robin(&candidates, message_id).unwrap().id.clone();
        let second = round_robin(&candidates, message_id).unwrap().id.clone();
        assert_eq!(first, second);
    }

    #[test]
    fn load_balanced_picks_minimum_load() {
        let candidates = vec![
            candidate("a", 0.8, HealthStatus::Healthy),
            candidate("b", 0.2, HealthStatus::Healthy),
        ];
        let chosen = load_balanced(&candidates).unwrap();
        assert_eq!(chosen.id, ComponentId::new("b"));
    }

    #[test]
    fn route_by_health_excludes_unhealthy() {
        let candidates = vec![
            candidate("a", 0.1, HealthStatus::Unhealthy),
            candidate("b", 0.5, HealthStatus::Degraded),
        ];
        let chosen = route_by_health(&candidates).unwrap();
        assert_eq!(chosen.id, ComponentId::new("b"));
    }

    #[test]
    fn route_by_health_with_no_routable_candidates_errors() {
        let candidates = vec![candidate("a", 0.1, HealthStatus::Unhealthy)];
        let result = route_by_health(&candidates);
        assert!(matches!(result, Err(CommunicationError::NoHealthyComponents)));
    }
}
