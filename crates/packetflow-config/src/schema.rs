use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The set of value shapes a configuration field may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    List,
    Map,
    Atom,
}

impl FieldType {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String | FieldType::Atom => value.is_string(),
            FieldType::Integer => value.is_i64() || value.is_u64(),
            FieldType::Float => value.is_f64() || value.is_i64() || value.is_u64(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::List => value.is_array(),
            FieldType::Map => value.is_object(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::List => "list",
            FieldType::Map => "map",
            FieldType::Atom => "atom",
        };
        f.write_str(name)
    }
}

/// Result of a custom [`FieldSchema::validator`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorOutcome {
    Valid,
    Invalid { error: String, reason: String },
}

/// A custom, per-field validation predicate, run after the built-in
/// presence/type checks pass.
pub type FieldValidator = dyn Fn(&Value) -> ValidatorOutcome + Send + Sync;

/// A single field's shape within a [`Schema`].
#[derive(Clone)]
pub struct FieldSchema {
    pub field_type: FieldType,
    pub required: bool,
    pub default: Option<Value>,
    pub description: Option<String>,
    pub validator: Option<Arc<FieldValidator>>,
}

impl fmt::Debug for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSchema")
            .field("field_type", &self.field_type)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("description", &self.description)
            .field("validator", &self.validator.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl FieldSchema {
    pub fn required(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: true,
            default: None,
            description: None,
            validator: None,
        }
    }

    pub fn optional(field_type: FieldType, default: Value) -> Self {
        Self {
            field_type,
            required: false,
            default: Some(default),
            description: None,
            validator: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_validator(
        mut self,
        validator: impl Fn(&Value) -> ValidatorOutcome + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }
}

/// Describes the valid shape of a component's configuration object.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: BTreeMap<String, FieldSchema>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, field: FieldSchema) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    /// Validates a candidate config object, applying defaults for any
    /// missing optional fields and collecting every violation rather than
    /// failing on the first.
    pub fn validate_and_fill(&self, config: &Value) -> Result<Value, SchemaError> {
        let mut errors = Vec::new();
        let mut filled = config.as_object().cloned().unwrap_or_default();

        for (name, field) in &self.fields {
            match filled.get(name) {
                Some(value) => {
                    if !field.field_type.matches(value) {
                        errors.push(format!(
                            "field '{name}' expected type {} but got {value}",
                            field.field_type
                        ));
                    } else if let Some(validator) = &field.validator {
                        if let ValidatorOutcome::Invalid { error, reason } = validator(value) {
                            errors.push(format!("field '{name}' failed validation: {error} ({reason})"));
                        }
                    }
                }
                None => {
                    if field.required {
                        errors.push(format!("missing required field '{name}'"));
                    } else if let Some(default) = &field.default {
                        filled.insert(name.clone(), default.clone());
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(Value::Object(filled))
        } else {
            Err(SchemaError::ValidationFailed(errors))
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SchemaError {
    #[error("schema validation failed: {0:?}")]
    ValidationFailed(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_required_field_is_reported() {
        let schema = Schema::new().with_field("timeout_ms", FieldSchema::required(FieldType::Integer));
        let result = schema.validate_and_fill(&json!({}));
        assert!(result.is_err());
    }

    #[test]
    fn optional_field_is_filled_with_default() {
        let schema = Schema::new()
            .with_field("retries", FieldSchema::optional(FieldType::Integer, json!(3)));
        let filled = schema.validate_and_fill(&json!({})).unwrap();
        assert_eq!(filled["retries"], json!(3));
    }

    #[test]
    fn type_mismatch_is_reported() {
        let schema = Schema::new().with_field("enabled", FieldSchema::required(FieldType::Boolean));
        let result = schema.validate_and_fill(&json!({"enabled": "yes"}));
        assert!(result.is_err());
    }

    #[test]
    fn custom_validator_rejects_out_of_range_value() {
        let schema = Schema::new().with_field(
            "port",
            FieldSchema::required(FieldType::Integer).with_validator(|v| {
                if v.as_i64().is_some_and(|n| (1..=65535).contains(&n)) {
                    ValidatorOutcome::Valid
                } else {
                    ValidatorOutcome::Invalid {
                        error: "out_of_range".to_string(),
                        reason: "port must be between 1 and 65535".to_string(),
                    }
                }
            }),
        );

        assert!(schema.validate_and_fill(&json!({"port": 8080})).is_ok());

        let err = schema.validate_and_fill(&json!({"port": 70000})).unwrap_err();
        match err {
            SchemaError::ValidationFailed(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("out_of_range"));
            }
        }
    }
}
