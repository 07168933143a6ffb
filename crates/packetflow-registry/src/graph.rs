use indexmap::{IndexMap, IndexSet};
use packetflow_types::ComponentId;

use crate::error::RegistryError;

/// Dependency DAG over registered components. An edge `a -> b` means "a
/// depends on b" (b must be healthy before a starts). Cycle detection
/// mirrors `packetflow-capability::graph`'s DFS three-coloring, applied
/// here to component identities instead of capability operations.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// component -> its direct dependencies
    dependencies: IndexMap<ComponentId, IndexSet<ComponentId>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: ComponentId) {
        self.dependencies.entry(id).or_default();
    }

    pub fn unregister(&mut self, id: &ComponentId) {
        self.dependencies.shift_remove(id);
        for deps in self.dependencies.values_mut() {
            deps.shift_remove(id);
        }
    }

    pub fn add_dependency(&mut self, from: &ComponentId, to: &ComponentId) -> Result<(), RegistryError> {
        if from == to {
            return Err(RegistryError::SelfDependency(from.clone()));
        }

        let mut trial = self.dependencies.clone();
        trial.entry(from.clone()).or_default().insert(to.clone());

        if has_cycle(&trial) {
            return Err(RegistryError::DependencyCycle {
                from: from.clone(),
                to: to.clone(),
            });
        }

        self.dependencies = trial;
        Ok(())
    }

    pub fn remove_dependency(&mut self, from: &ComponentId, to: &ComponentId) {
        if let Some(deps) = self.dependencies.get_mut(from) {
            deps.shift_remove(to);
        }
    }

    pub fn dependencies_of(&self, id: &ComponentId) -> Vec<ComponentId> {
        self.dependencies
            .get(id)
            .map(|deps| deps.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Components that depend on `id`, i.e. the reverse edges.
    pub fn dependents_of(&self, id: &ComponentId) -> Vec<ComponentId> {
        self.dependencies
            .iter()
            .filter(|(_, deps)| deps.contains(id))
            .map(|(component, _)| component.clone())
            .collect()
    }

    /// Topologically sorts all registered components so that every
    /// component appears after everything it depends on. Returns
    /// `StartupCycle` if the graph (somehow) contains a cycle.
    pub fn topological_order(&self) -> Result<Vec<ComponentId>, RegistryError> {
        if has_cycle(&self.dependencies) {
            return Err(RegistryError::StartupCycle);
        }

        let mut visited: IndexSet<ComponentId> = IndexSet::new();
        let mut order = Vec::with_capacity(self.dependencies.len());

        fn visit(
            node: &ComponentId,
            deps: &IndexMap<ComponentId, IndexSet<ComponentId>>,
            visited: &mut IndexSet<ComponentId>,
            order: &mut Vec<ComponentId>,
        ) {
            if visited.contains(node) {
                return;
            }
            visited.insert(node.clone());
            if let Some(children) = deps.get(node) {
                for child in children {
                    visit(child, deps, visited, order);
                }
            }
            order.push(node.clone());
        }

        for node in self.dependencies.keys() {
            visit(node, &self.dependencies, &mut visited, &mut order);
        }

        Ok(order)
    }
}

fn has_cycle(edges: &IndexMap<ComponentId, IndexSet<ComponentId>>) -> bool {
    #[derive(PartialEq)]
    enum Color {
        White,
        Gray,
        Black,
    }

    use std::collections::HashMap;
    let mut colors: HashMap<ComponentId, Color> = HashMap::new();

    fn visit(
        node: &ComponentId,
        edges: &IndexMap<ComponentId, IndexSet<ComponentId>>,
        colors: &mut HashMap<ComponentId, Color>,
    ) -> bool {
        match colors.get(node) {
            Some(Color::Black) => return false,
            Some(Color::Gray) => return true,
            _ => {}
        }

        colors.insert(node.clone(), Color::Gray);
        if let Some(children) = edges.get(node) {
            for child in children {
                if visit(child, edges, colors) {
                    return true;
                }
            }
        }
        colors.insert(node.clone(), Color::Black);
        false
    }

    for node in edges.keys() {
        if visit(node, edges, &mut colors) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> ComponentId {
        ComponentId::new(name)
    }

    #[test]
    fn self_dependency_is_rejected() {
        let mut graph = DependencyGraph::new();
        graph.register(id("a"));
        let err = graph.add_dependency(&id("a"), &id("a")).unwrap_err();
        assert!(matches!(err, RegistryError::SelfDependency(_)));
    }

    #[test]
    fn transitive_cycle_is_rejected() {
        let mut graph = DependencyGraph::new();
        graph.register(id("a"));
        graph.register(id("b"));
        graph.register(id("c"));
        graph.add_dependency(&id("a"), &id("b")).unwrap();
        graph.add_dependency(&id("b"), &id("c")).unwrap();
        let err = graph.add_dependency(&id("c"), &id("a")).unwrap_err();
        assert!(matches!(err, RegistryError::DependencyCycle { .. }));
    }

    #[test]
    fn topological_order_respects_dependencies() {
        let mut graph = DependencyGraph::new();
        graph.register(id("a"));
        graph.register(id("b"));
        graph.register(id("c"));
        graph.add_dependency(&id("a"), &id("b")).unwrap();
        graph.add_dependency(&id("b"), &id("c")).unwrap();

        let order = graph.topological_order().unwrap();
        let pos = |name: &str| order.iter().position(|x| *x == id(name)).unwrap();
        assert!(pos("c") < pos("b"));
        assert!(pos("b") < pos("a"));
    }

    #[test]
    fn dependents_of_lists_direct_dependents_only() {
        let mut graph = DependencyGraph::new();
        graph.register(id("a"));
        graph.register(id("b"));
        graph.add_dependency(&id("a"), &id("b")).unwrap();
        assert_eq!(graph.dependents_of(&id("b")), vec![id("a")]);
        assert!(graph.dependents_of(&id("a")).is_empty());
    }
}
