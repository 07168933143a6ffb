use std::collections::HashMap;

use packetflow_types::{ComponentId, Environment};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::record::ConfigRecord;
use crate::schema::Schema;
use crate::template::ConfigTemplate;

const MAX_HISTORY: usize = 10;

struct ComponentHistory {
    versions: Vec<ConfigRecord>,
}

impl ComponentHistory {
    fn push(&mut self, record: ConfigRecord) {
        self.versions.push(record);
        if self.versions.len() > MAX_HISTORY {
            let overflow = self.versions.len() - MAX_HISTORY;
            self.versions.drain(0..overflow);
        }
    }

    fn current(&self) -> &ConfigRecord {
        self.versions.last().expect("history is never empty")
    }

    fn find_version(&self, version: u64) -> Option<&ConfigRecord> {
        self.versions.iter().find(|r| r.version() == version)
    }
}

/// Runtime registry of schema-validated, versioned per-component
/// configuration. Bounded history (cap 10) per component mirrors
/// `kimberlite-directory`'s `ShardMigration` trim-on-push ring buffer —
/// old versions fall off silently rather than growing without bound.
#[derive(Default)]
pub struct ConfigStore {
    components: HashMap<ComponentId, ComponentHistory>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_component_config(
        &mut self,
        component_id: ComponentId,
        config: Value,
        schema: Schema,
        environment: Environment,
    ) -> Result<(), ConfigError> {
        let filled = schema
            .validate_and_fill(&config)
            .map_err(|e| ConfigError::ValidationFailed {
                errors: match e {
                    crate::schema::SchemaError::ValidationFailed(errors) => errors,
                },
            })?;

        let record = ConfigRecord::new(component_id.clone(), filled, schema, environment);
        debug!(component = %component_id, "registered component config");
        self.components
            .insert(component_id, ComponentHistory { versions: vec![record] });
        Ok(())
    }

    pub fn current_config(&self, component_id: &ComponentId) -> Result<&ConfigRecord, ConfigError> {
        self.components
            .get(component_id)
            .map(ComponentHistory::current)
            .ok_or_else(|| ConfigError::ComponentNotFound(component_id.as_str().to_string()))
    }

    /// Replaces a component's entire config value, re-validating against
    /// its registered schema and pushing a new version onto its history.
    pub fn update_config(
        &mut self,
        component_id: &ComponentId,
        config: Value,
    ) -> Result<u64, ConfigError> {
        let history = self
            .components
            .get_mut(component_id)
            .ok_or_else(|| ConfigError::ComponentNotFound(component_id.as_str().to_string()))?;

        let current = history.current();
        let schema = current
            .schema()
            .ok_or_else(|| ConfigError::SchemaNotFound(component_id.as_str().to_string()))?;
        let filled = schema
            .validate_and_fill(&config)
            .map_err(|e| ConfigError::ValidationFailed {
                errors: match e {
                    crate::schema::SchemaError::ValidationFailed(errors) => errors,
                },
            })?;

        let next = current.next_version(filled);
        let version = next.version();
        history.push(next);
        Ok(version)
    }

    /// Updates a single field within a component's config, merging into
    /// the current value before re-validating the whole object.
    pub fn update_config_value(
        &mut self,
        component_id: &ComponentId,
        field: &str,
        value: Value,
    ) -> Result<u64, ConfigError> {
        let mut merged = self.current_config(component_id)?.config().clone();
        if let Value::Object(map) = &mut merged {
            map.insert(field.to_string(), value);
        }
        self.update_config(component_id, merged)
    }

    /// Rolls a component back to a prior version by re-pushing a copy of
    /// it as the newest version, preserving history rather than rewinding
    /// it (so the rollback itself is auditable).
    pub fn rollback_config(
        &mut self,
        component_id: &ComponentId,
        version: u64,
    ) -> Result<u64, ConfigError> {
        let history = self
            .components
            .get_mut(component_id)
            .ok_or_else(|| ConfigError::ComponentNotFound(component_id.as_str().to_string()))?;

        let target = history
            .find_version(version)
            .ok_or_else(|| ConfigError::VersionNotFound {
                component: component_id.as_str().to_string(),
                version: version.to_string(),
            })?
            .clone();

        let rolled_back = history.current().next_version(target.config().clone());
        let new_version = rolled_back.version();
        warn!(component = %component_id, from_version = version, to_version = new_version, "rolled back config");
        history.push(rolled_back);
        Ok(new_version)
    }

    pub fn apply_template(
        &mut self,
        component_id: ComponentId,
        template: &ConfigTemplate,
        environment: Environment,
    ) -> Result<(), ConfigError> {
        let config = template.apply(environment)?;
        self.register_component_config(component_id, config, template.schema().clone(), environment)
    }

    /// Exports every component's current config as a single JSON object
    /// keyed by component id, for backup or inspection.
    pub fn export_json(&self) -> Value {
        let map = self
            .components
            .iter()
            .map(|(id, history)| (id.as_str().to_string(), history.current().config().clone()))
            .collect();
        Value::Object(map)
    }

    /// Imports a JSON object of `component_id -> config` pairs, updating
    /// each already-registered component's config in place. Unknown
    /// components or malformed entries are reported, not silently
    /// skipped.
    pub fn import_json(&mut self, payload: &Value) -> Result<(), ConfigError> {
        let map = payload
            .as_object()
            .ok_or_else(|| ConfigError::InvalidImport("expected a JSON object".to_string()))?;

        for (component_id, config) in map {
            let id = ComponentId::from(component_id.as_str());
            self.update_config(&id, config.clone())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSchema, FieldType};
    use serde_json::json;

    fn sample_schema() -> Schema {
        Schema::new().with_field(
            "timeout_ms",
            FieldSchema::optional(FieldType::Integer, json!(1000)),
        )
    }

    #[test]
    fn history_is_capped_at_ten_versions() {
        let mut store = ConfigStore::new();
        let id = ComponentId::from("worker-1");
        store
            .register_component_config(id.clone(), json!({}), sample_schema(), Environment::Test)
            .unwrap();

        for i in 0..15 {
            store
                .update_config(&id, json!({"timeout_ms": i}))
                .unwrap();
        }

        let history = &store.components[&id];
        assert_eq!(history.versions.len(), MAX_HISTORY);
    }

    #[test]
    fn rollback_restores_prior_value_as_new_version() {
        let mut store = ConfigStore::new();
        let id = ComponentId::from("worker-2");
        store
            .register_component_config(id.clone(), json!({}), sample_schema(), Environment::Test)
            .unwrap();
        store.update_config(&id, json!({"timeout_ms": 42})).unwrap();
        store.update_config(&id, json!({"timeout_ms": 99})).unwrap();

        let new_version = store.rollback_config(&id, 2).unwrap();
        let current = store.current_config(&id).unwrap();
        assert_eq!(current.version(), new_version);
        assert_eq!(current.config()["timeout_ms"], json!(42));
    }

    #[test]
    fn update_with_invalid_type_is_rejected() {
        let mut store = ConfigStore::new();
        let id = ComponentId::from("worker-3");
        store
            .register_component_config(id.clone(), json!({}), sample_schema(), Environment::Test)
            .unwrap();

        let result = store.update_config(&id, json!({"timeout_ms": "not a number"}));
        assert!(result.is_err());
    }
}
