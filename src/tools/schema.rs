//! Parameter schemas and argument validation
//!
//! Each tool declares the arguments it accepts as a list of named, typed
//! parameters. The dispatcher validates incoming arguments against this
//! contract before the executor runs, so executors never see missing or
//! mistyped required parameters.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Primitive types a parameter can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Boolean,
    Object,
}

impl ParamType {
    /// JSON schema type name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
        }
    }

    /// Check a JSON value against this type
    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
        }
    }
}

/// Human-readable name for a JSON value's actual type
fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A single declared parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParamSpec {
    /// Required parameter of the given type
    pub fn required(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: true,
            description: None,
        }
    }

    /// Optional parameter of the given type
    pub fn optional(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: false,
            description: None,
        }
    }

    /// Attach a description
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Structured diagnostics for argument validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaViolation {
    #[error("arguments must be a JSON object, got {actual}")]
    NotAnObject { actual: &'static str },

    #[error("missing required parameter '{param}'")]
    Missing { param: String },

    #[error("parameter '{param}' must be a {expected}, got {actual}")]
    WrongType {
        param: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Ordered parameter contract for one tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterSchema {
    pub params: Vec<ParamSpec>,
}

impl ParameterSchema {
    /// Schema accepting no parameters
    pub fn empty() -> Self {
        Self { params: Vec::new() }
    }

    /// Build from a list of parameter specs
    pub fn new(params: Vec<ParamSpec>) -> Self {
        Self { params }
    }

    /// Validate arguments against this schema.
    ///
    /// Every required parameter must be present; present parameters must
    /// match their declared type. Extra parameters not in the schema are
    /// ignored.
    pub fn validate(&self, args: &Value) -> Result<(), SchemaViolation> {
        let map = args.as_object().ok_or(SchemaViolation::NotAnObject {
            actual: value_type_name(args),
        })?;

        for spec in &self.params {
            match map.get(&spec.name) {
                None => {
                    if spec.required {
                        return Err(SchemaViolation::Missing {
                            param: spec.name.clone(),
                        });
                    }
                }
                Some(value) => {
                    if !spec.param_type.matches(value) {
                        return Err(SchemaViolation::WrongType {
                            param: spec.name.clone(),
                            expected: spec.param_type.as_str(),
                            actual: value_type_name(value),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// JSON-schema-shaped value for the enumeration entry point
    pub fn to_json_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for spec in &self.params {
            let mut prop = serde_json::Map::new();
            prop.insert("type".to_string(), Value::String(spec.param_type.as_str().to_string()));
            if let Some(desc) = &spec.description {
                prop.insert("description".to_string(), Value::String(desc.clone()));
            }
            properties.insert(spec.name.clone(), Value::Object(prop));
            if spec.required {
                required.push(Value::String(spec.name.clone()));
            }
        }

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required
        })
    }
}
