//! Tool call input and outcome types.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A model-requested invocation. Arguments are untrusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        let arguments = match arguments {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Outcome of a tool call.
///
/// Serializes as `{"success": true, "data": ..}` or `{"success": false, "error": ".."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    Success(Value),
    Failure(String),
}

impl ToolResult {
    pub fn success(data: Value) -> Self {
        ToolResult::Success(data)
    }

    pub fn failure(error: impl Into<String>) -> Self {
        ToolResult::Failure(error.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolResult::Success(_))
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            ToolResult::Success(data) => Some(data),
            ToolResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ToolResult::Success(_) => None,
            ToolResult::Failure(error) => Some(error),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ToolResult::Success(data) => serde_json::json!({"success": true, "data": data}),
            ToolResult::Failure(error) => serde_json::json!({"success": false, "error": error}),
        }
    }
}

impl Serialize for ToolResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            ToolResult::Success(data) => {
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
            }
            ToolResult::Failure(error) => {
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
            }
        }
        map.end()
    }
}
