use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::capability::Capability;
use crate::error::CapabilityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// A declared, acyclic implication graph over capability *operations*.
/// `implies`/`compose`/`grants` are the public surface; registration and
/// reachability caching are the mechanics that realize them.
///
/// Grounded on `kimberlite-rbac::roles`'s declarative role → permission
/// mapping, generalized into an explicit DAG the caller builds up via
/// [`register`](Self::register) rather than a fixed `match`.
#[derive(Debug, Default)]
pub struct ImplicationGraph {
    edges: IndexMap<String, Vec<String>>,
    reachable_cache: RefCell<HashMap<String, HashSet<String>>>,
}

impl ImplicationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares that `parent` implies each of `children`. Rejected with
    /// [`CapabilityError::ImplicationCycle`] if the new edges would make
    /// the graph cyclic — requires full acyclicity, not the
    /// self-edge-only check `kimberlite`'s own `check_circular_dependency`
    /// performs (see DESIGN.md Open Question #1).
    pub fn register<I, S>(&mut self, parent: &str, children: I) -> Result<(), CapabilityError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let children: Vec<String> = children.into_iter().map(Into::into).collect();

        let mut trial = self.edges.clone();
        trial
            .entry(parent.to_string())
            .or_default()
            .extend(children.iter().cloned());

        if let Some(cycle_child) = find_cycle(&trial, parent) {
            return Err(CapabilityError::ImplicationCycle {
                parent: parent.to_string(),
                child: cycle_child,
            });
        }

        self.edges = trial;
        self.reachable_cache.borrow_mut().clear();
        Ok(())
    }

    /// Transitive set of operations reachable from `op` (excluding `op`
    /// itself), cached after first computation.
    pub fn reachable_operations(&self, op: &str) -> HashSet<String> {
        if let Some(cached) = self.reachable_cache.borrow().get(op) {
            return cached.clone();
        }

        let mut visited = HashSet::new();
        let mut stack = vec![op.to_string()];
        while let Some(current) = stack.pop() {
            if let Some(children) = self.edges.get(&current) {
                for child in children {
                    if visited.insert(child.clone()) {
                        stack.push(child.clone());
                    }
                }
            }
        }

        self.reachable_cache
            .borrow_mut()
            .insert(op.to_string(), visited.clone());
        visited
    }

    /// `implies(a, b)`: reflexive, transitive, wildcard-aware. `a = b`
    /// is covered by the reflexive same-operation, resource-covering
    /// case below (an identical capability always covers itself).
    pub fn implies(&self, a: &Capability, b: &Capability) -> bool {
        let same_or_reachable = a.operation() == b.operation()
            || self.reachable_operations(a.operation()).contains(b.operation());
        same_or_reachable && a.resource_covers(b)
    }

    /// Capabilities directly or transitively granted by `c`, not
    /// including `c` itself — `CapabilitySet::compose` unions `{c} ∪
    /// grants(c)`, so `grants` alone is just the rest of the closure.
    pub fn grants(&self, c: &Capability) -> Vec<Capability> {
        self.reachable_operations(c.operation())
            .into_iter()
            .map(|op| {
                let mut granted = Capability::new(op, c.resource().to_string());
                if let Some(constraint) = c.constraint() {
                    granted = granted.with_constraint(constraint.clone());
                }
                granted
            })
            .collect()
    }
}

/// Returns the first node name involved in a cycle reachable from `start`,
/// or `None` if the graph is acyclic. Standard DFS three-coloring
///.
fn find_cycle(edges: &IndexMap<String, Vec<String>>, start: &str) -> Option<String> {
    let mut color: HashMap<&str, Color> = HashMap::new();

    fn visit<'a>(
        node: &'a str,
        edges: &'a IndexMap<String, Vec<String>>,
        color: &mut HashMap<&'a str, Color>,
    ) -> Option<String> {
        match color.get(node) {
            Some(Color::Black) => return None,
            Some(Color::Gray) => return Some(node.to_string()),
            _ => {}
        }
        color.insert(node, Color::Gray);
        if let Some(children) = edges.get(node) {
            for child in children {
                if let Some(cycle) = visit(child.as_str(), edges, color) {
                    return Some(cycle);
                }
            }
        }
        color.insert(node, Color::Black);
        None
    }

    visit(start, edges, &mut color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> ImplicationGraph {
        let mut g = ImplicationGraph::new();
        g.register("admin", ["read", "write", "delete"]).unwrap();
        g.register("write", ["read"]).unwrap();
        g
    }

    #[test]
    fn admin_implies_delete_transitively() {
        let g = sample_graph();
        let admin = Capability::new("admin", "*");
        let delete = Capability::new("delete", "*");
        assert!(g.implies(&admin, &delete));
    }

    #[test]
    fn read_does_not_imply_admin() {
        let g = sample_graph();
        let admin = Capability::new("admin", "*");
        let read = Capability::new("read", "*");
        assert!(!g.implies(&read, &admin));
    }

    #[test]
    fn implies_is_reflexive() {
        let g = sample_graph();
        let read = Capability::new("read", "/x");
        assert!(g.implies(&read, &read));
    }

    #[test]
    fn implies_is_transitive() {
        let g = sample_graph();
        let admin = Capability::new("admin", "*");
        let write = Capability::new("write", "*");
        let read = Capability::new("read", "*");
        assert!(g.implies(&admin, &write));
        assert!(g.implies(&write, &read));
        assert!(g.implies(&admin, &read));
    }

    #[test]
    fn register_rejects_cycles() {
        let mut g = ImplicationGraph::new();
        g.register("a", ["b"]).unwrap();
        g.register("b", ["c"]).unwrap();
        let err = g.register("c", ["a"]).unwrap_err();
        assert!(matches!(err, CapabilityError::ImplicationCycle { .. }));
    }

    #[test]
    fn self_loop_is_rejected() {
        let mut g = ImplicationGraph::new();
        let err = g.register("a", ["a"]).unwrap_err();
        assert!(matches!(err, CapabilityError::ImplicationCycle { .. }));
    }

    #[test]
    fn wildcard_resource_implication() {
        let g = sample_graph();
        let admin_any = Capability::new("admin", "*");
        let delete_specific = Capability::new("delete", "/reports/9");
        assert!(g.implies(&admin_any, &delete_specific));

        let admin_specific = Capability::new("admin", "/reports/9");
        let delete_other = Capability::new("delete", "/reports/other");
        assert!(!g.implies(&admin_specific, &delete_other));
    }
}
