use packetflow_types::Environment;
use serde_json::Value;

use crate::error::ConfigError;
use crate::schema::Schema;

/// A named, reusable default configuration restricted to a subset of
/// deployment environments (e.g. a `debug-verbose` template that is
/// only valid in `Dev`/`Test`).
#[derive(Debug, Clone)]
pub struct ConfigTemplate {
    name: String,
    description: String,
    default_config: Value,
    schema: Schema,
    allowed_environments: Vec<Environment>,
}

impl ConfigTemplate {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        default_config: Value,
        schema: Schema,
        allowed_environments: Vec<Environment>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            default_config,
            schema,
            allowed_environments,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn allowed_environments(&self) -> &[Environment] {
        &self.allowed_environments
    }

    /// Produces the schema-validated config this template resolves to
    /// for `environment`, rejecting environments it wasn't authored for.
    pub fn apply(&self, environment: Environment) -> Result<Value, ConfigError> {
        if !self.allowed_environments.contains(&environment) {
            return Err(ConfigError::TemplateNotForEnvironment {
                name: self.name.clone(),
                environment,
            });
        }

        self.schema
            .validate_and_fill(&self.default_config)
            .map_err(|e| ConfigError::ValidationFailed {
                errors: match e {
                    crate::schema::SchemaError::ValidationFailed(errors) => errors,
                },
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSchema, FieldType};
    use serde_json::json;

    #[test]
    fn template_rejects_disallowed_environment() {
        let template = ConfigTemplate::new(
            "debug-verbose",
            "verbose logging for local development",
            json!({"log_level": "debug"}),
            Schema::new().with_field(
                "log_level",
                FieldSchema::optional(FieldType::String, json!("info")),
            ),
            vec![Environment::Dev, Environment::Test],
        );

        let result = template.apply(Environment::Prod);
        assert!(matches!(
            result,
            Err(ConfigError::TemplateNotForEnvironment { .. })
        ));
    }

    #[test]
    fn template_applies_for_allowed_environment() {
        let template = ConfigTemplate::new(
            "debug-verbose",
            "verbose logging for local development",
            json!({}),
            Schema::new().with_field(
                "log_level",
                FieldSchema::optional(FieldType::String, json!("debug")),
            ),
            vec![Environment::Dev],
        );

        let resolved = template.apply(Environment::Dev).unwrap();
        assert_eq!(resolved["log_level"], json!("debug"));
    }
}
