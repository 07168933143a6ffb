use packetflow_types::ComponentId;

#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error("component {0} is already registered")]
    AlreadyRegistered(ComponentId),

    #[error("component {0} is not registered")]
    NotFound(ComponentId),

    #[error("cannot unregister {component}: still depended on by {dependents:?}")]
    HasDependents {
        component: ComponentId,
        dependents: Vec<ComponentId>,
    },

    #[error("a component cannot depend on itself: {0}")]
    SelfDependency(ComponentId),

    #[error("adding dependency {from} -> {to} would create a cycle")]
    DependencyCycle {
        from: ComponentId,
        to: ComponentId,
    },

    #[error("startup order cannot be computed: dependency graph contains a cycle")]
    StartupCycle,
}
