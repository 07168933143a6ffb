use chrono::{DateTime, Utc};
use packetflow_types::{ComponentId, Environment};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::Schema;

/// A single versioned snapshot of a component's configuration, as held
/// in a [`crate::ConfigStore`]'s bounded history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigRecord {
    component_id: ComponentId,
    config: Value,
    #[serde(skip)]
    schema: Option<Schema>,
    version: u64,
    environment: Environment,
    last_updated: DateTime<Utc>,
    metadata: std::collections::BTreeMap<String, Value>,
}

impl ConfigRecord {
    pub fn new(
        component_id: ComponentId,
        config: Value,
        schema: Schema,
        environment: Environment,
    ) -> Self {
        Self {
            component_id,
            config,
            schema: Some(schema),
            version: 1,
            environment,
            last_updated: Utc::now(),
            metadata: std::collections::BTreeMap::new(),
        }
    }

    pub fn component_id(&self) -> &ComponentId {
        &self.component_id
    }

    pub fn config(&self) -> &Value {
        &self.config
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn metadata(&self) -> &std::collections::BTreeMap<String, Value> {
        &self.metadata
    }

    /// Produces the next version of this record with a replaced config
    /// value, keeping the same schema and component identity.
    pub(crate) fn next_version(&self, config: Value) -> Self {
        Self {
            component_id: self.component_id.clone(),
            config,
            schema: self.schema.clone(),
            version: self.version + 1,
            environment: self.environment,
            last_updated: Utc::now(),
            metadata: self.metadata.clone(),
        }
    }
}
