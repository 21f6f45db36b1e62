//! Tool schema types: the JSON Schema subset exposed to the model.
//!
//! Wire shape: `{name, description, parameters: {type: "object", properties: {..}, required?: [..]}}`.
//! The `parameters` object is handed to every provider serializer unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// =============================================================================
// Property types
// =============================================================================

/// JSON Schema primitive type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl JsonType {
    /// Whether `value` has this type. Integers also satisfy `number`.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            JsonType::String => value.is_string(),
            JsonType::Integer => value.is_i64() || value.is_u64(),
            JsonType::Number => value.is_number(),
            JsonType::Boolean => value.is_boolean(),
            JsonType::Array => value.is_array(),
            JsonType::Object => value.is_object(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::String => "string",
            JsonType::Integer => "integer",
            JsonType::Number => "number",
            JsonType::Boolean => "boolean",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }
}

pub(crate) fn value_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Property schema
// =============================================================================

/// Schema of a single parameter (or of an array's items).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub json_type: JsonType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertySchema>>,
}

impl PropertySchema {
    fn of(json_type: JsonType, description: &str) -> Self {
        Self {
            json_type,
            description: (!description.is_empty()).then(|| description.to_string()),
            enum_values: None,
            items: None,
        }
    }

    pub fn string(description: &str) -> Self {
        Self::of(JsonType::String, description)
    }

    pub fn integer(description: &str) -> Self {
        Self::of(JsonType::Integer, description)
    }

    pub fn boolean(description: &str) -> Self {
        Self::of(JsonType::Boolean, description)
    }

    pub fn array_of(items: PropertySchema, description: &str) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(JsonType::Array, description)
        }
    }

    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Check a JSON value against this schema.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        if !self.json_type.accepts(value) {
            return Err(format!(
                "expected {}, got {}",
                self.json_type.as_str(),
                value_type_name(value)
            ));
        }

        if let (Some(allowed), Some(s)) = (&self.enum_values, value.as_str()) {
            if !allowed.iter().any(|a| a == s) {
                return Err(format!(
                    "invalid enum value '{}', expected one of: {}",
                    s,
                    allowed.join(", ")
                ));
            }
        }

        if let (Some(items), Some(arr)) = (&self.items, value.as_array()) {
            for (i, item) in arr.iter().enumerate() {
                items
                    .validate(item)
                    .map_err(|e| format!("at index {}: {}", i, e))?;
            }
        }

        Ok(())
    }

    /// Human-readable type name for prompt generation.
    pub fn display_name(&self) -> String {
        match (&self.enum_values, &self.items) {
            (Some(values), _) => format!("enum({})", values.join("|")),
            (None, Some(items)) => format!("{}[]", items.display_name()),
            (None, None) => self.json_type.as_str().to_string(),
        }
    }
}

// =============================================================================
// Parameter schema
// =============================================================================

/// The `parameters` object of a tool: always `type: "object"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSchema {
    #[serde(rename = "type")]
    pub json_type: JsonType,
    pub properties: BTreeMap<String, PropertySchema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl Default for ParameterSchema {
    fn default() -> Self {
        Self {
            json_type: JsonType::Object,
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }
}

impl ParameterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn optional(mut self, name: &str, schema: PropertySchema) -> Self {
        self.properties.insert(name.to_string(), schema);
        self
    }

    pub fn required(mut self, name: &str, schema: PropertySchema) -> Self {
        self.properties.insert(name.to_string(), schema);
        if !self.required.iter().any(|r| r == name) {
            self.required.push(name.to_string());
        }
        self
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

// =============================================================================
// Tool schema
// =============================================================================

/// Complete schema of one tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: ParameterSchema,
}

impl ToolSchema {
    pub fn new(name: &str, description: &str, parameters: ParameterSchema) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
        }
    }

    /// Prompt line for this tool.
    ///
    /// Format: `- name(param1: type, param2?: type): description`
    pub fn to_prompt_line(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .properties
            .iter()
            .map(|(name, schema)| {
                let optional = if self.parameters.is_required(name) { "" } else { "?" };
                format!("{}{}: {}", name, optional, schema.display_name())
            })
            .collect();

        format!("- {}({}): {}", self.name, params.join(", "), self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ToolSchema {
        ToolSchema::new(
            "lookup",
            "Look something up",
            ParameterSchema::new()
                .required("term", PropertySchema::string("What to look up"))
                .optional(
                    "kinds",
                    PropertySchema::array_of(
                        PropertySchema::string("").with_enum(["a", "b"]),
                        "Kinds to include",
                    ),
                ),
        )
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "lookup",
                "description": "Look something up",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "kinds": {
                            "type": "array",
                            "description": "Kinds to include",
                            "items": {"type": "string", "enum": ["a", "b"]}
                        },
                        "term": {"type": "string", "description": "What to look up"}
                    },
                    "required": ["term"]
                }
            })
        );
    }

    #[test]
    fn test_required_omitted_when_empty() {
        let value = serde_json::to_value(ParameterSchema::new()).unwrap();
        assert_eq!(value, json!({"type": "object", "properties": {}}));
    }

    #[test]
    fn test_validate_nested_enum() {
        let kinds = &sample().parameters.properties["kinds"];
        assert!(kinds.validate(&json!(["a", "b"])).is_ok());
        let err = kinds.validate(&json!(["a", "z"])).unwrap_err();
        assert!(err.contains("at index 1"));
        assert!(kinds.validate(&json!("a")).is_err());
    }

    #[test]
    fn test_prompt_line_format() {
        assert_eq!(
            sample().to_prompt_line(),
            "- lookup(kinds?: enum(a|b)[], term: string): Look something up"
        );
    }
}
