use indexmap::IndexSet;

use crate::capability::Capability;
use crate::graph::ImplicationGraph;

/// A deduplicated, insertion-ordered set of capabilities.
///
/// Generalizes `kimberlite-rbac::PermissionSet`'s `grant`/`revoke`/
/// `contains` API from a fixed `Permission` enum to the open `Capability`
/// type, backed by `IndexSet` (rather than `PermissionSet`'s `Vec`) so
/// `contains` stays O(1) as capability sets grow — contexts carry these
/// on every propagation hop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    capabilities: IndexSet<Capability>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_iter(caps: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            capabilities: caps.into_iter().collect(),
        }
    }

    pub fn grant(&mut self, capability: Capability) {
        self.capabilities.insert(capability);
    }

    pub fn revoke(&mut self, capability: &Capability) {
        self.capabilities.shift_remove(capability);
    }

    pub fn contains(&self, capability: &Capability) -> bool {
        self.capabilities.contains(capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.capabilities.iter()
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// Whether any capability in this set implies `required` under
    /// `graph`, honoring temporal validity at `t` when the matching
    /// capability is temporal (distinguishing plain insufficiency from
    /// a temporal constraint violation).
    pub fn authorize(
        &self,
        graph: &ImplicationGraph,
        required: &Capability,
        t: chrono::DateTime<chrono::Utc>,
    ) -> Authorization {
        let mut implied_but_expired = false;
        for held in &self.capabilities {
            if graph.implies(held, required) {
                if held.valid_at(t) {
                    return Authorization::Granted;
                }
                implied_but_expired = true;
            }
        }
        if implied_but_expired {
            Authorization::TemporalViolation
        } else {
            Authorization::Insufficient
        }
    }

    /// `compose(cs)`: the transitive closure of declared grants over the
    /// input multiset. A left-fold over `{c} ∪ grants(c)` per capability;
    /// the `IndexSet` backing makes this naturally idempotent and
    /// order-independent, so `compose(compose(s)) == compose(s)` holds
    /// for any input set `s`.
    pub fn compose(graph: &ImplicationGraph, caps: impl IntoIterator<Item = Capability>) -> Self {
        let mut set = IndexSet::new();
        for cap in caps {
            for granted in graph.grants(&cap) {
                set.insert(granted);
            }
            set.insert(cap);
        }
        Self { capabilities: set }
    }
}

/// Outcome of checking whether a capability set authorizes a required
/// capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Granted,
    Insufficient,
    TemporalViolation,
}

impl IntoIterator for CapabilitySet {
    type Item = Capability;
    type IntoIter = indexmap::set::IntoIter<Capability>;

    fn into_iter(self) -> Self::IntoIter {
        self.capabilities.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> ImplicationGraph {
        let mut g = ImplicationGraph::new();
        g.register("admin", ["read", "write", "delete"]).unwrap();
        g.register("write", ["read"]).unwrap();
        g
    }

    #[test]
    fn compose_is_idempotent() {
        let g = graph();
        let once = CapabilitySet::compose(&g, vec![Capability::new("admin", "*")]);
        let twice = CapabilitySet::compose(&g, once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn compose_is_order_independent() {
        let g = graph();
        let a = Capability::new("admin", "*");
        let b = Capability::new("write", "/x");

        let mut forward = CapabilitySet::compose(&g, vec![a.clone(), b.clone()])
            .into_iter()
            .collect::<Vec<_>>();
        let mut backward = CapabilitySet::compose(&g, vec![b, a])
            .into_iter()
            .collect::<Vec<_>>();
        forward.sort_by_key(|c| c.to_string());
        backward.sort_by_key(|c| c.to_string());
        assert_eq!(forward, backward);
    }

    #[test]
    fn authorize_merge_scenario() {
        let g = graph();
        let mut set = CapabilitySet::new();
        set.grant(Capability::new("read", "/"));
        let required = Capability::new("read", "/");
        let t = chrono::Utc::now();
        assert_eq!(set.authorize(&g, &required, t), Authorization::Granted);
    }
}
