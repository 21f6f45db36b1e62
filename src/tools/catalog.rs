//! Tool catalog: ordered schema registry, argument checks, prompt generation.
//!
//! Owns tool *metadata*; the handlers live in [`crate::tools::handlers`].

use super::handlers::HealthTool;
use super::schema::ToolSchema;
use crate::types::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;

// =============================================================================
// Tool catalog
// =============================================================================

/// In-memory tool catalog. Registration order is the order tools are offered to a model.
#[derive(Debug, Default, Clone)]
pub struct ToolCatalog {
    schemas: Vec<ToolSchema>,
    index: HashMap<String, usize>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with every built-in health tool.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for tool in HealthTool::ALL {
            let schema = tool.schema();
            let name = schema.name.clone();
            catalog.index.insert(name, catalog.schemas.len());
            catalog.schemas.push(schema);
        }
        catalog
    }

    /// Register a tool schema.
    pub fn register(&mut self, schema: ToolSchema) -> Result<()> {
        if schema.name.trim().is_empty() {
            return Err(Error::validation("Tool name cannot be empty"));
        }
        if self.index.contains_key(&schema.name) {
            return Err(Error::validation(format!(
                "Tool already registered: {}",
                schema.name
            )));
        }
        self.index.insert(schema.name.clone(), self.schemas.len());
        self.schemas.push(schema);
        Ok(())
    }

    /// Get a tool schema by name.
    pub fn get(&self, name: &str) -> Option<&ToolSchema> {
        self.index.get(name).and_then(|&i| self.schemas.get(i))
    }

    /// Check if a tool exists.
    pub fn is_known(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All tool names, in registration order.
    pub fn list_names(&self) -> Vec<&str> {
        self.schemas.iter().map(|s| s.name.as_str()).collect()
    }

    /// All schemas, in registration order.
    pub fn schemas(&self) -> &[ToolSchema] {
        &self.schemas
    }

    /// Check arguments against a tool's parameter schema.
    ///
    /// Returns a list of problems (empty = conforming). Handlers coerce leniently,
    /// so these are diagnostics rather than rejections.
    pub fn validate_args(&self, name: &str, args: &Value) -> Result<Vec<String>> {
        let schema = self.get(name).ok_or_else(|| Error::unknown_tool(name))?;

        let empty = serde_json::Map::new();
        let arg_map = match args {
            Value::Null => &empty,
            Value::Object(map) => map,
            _ => return Err(Error::validation("arguments must be a JSON object")),
        };

        let mut problems = Vec::new();

        for required in &schema.parameters.required {
            if arg_map.get(required).map_or(true, Value::is_null) {
                problems.push(format!("Missing required parameter: {}", required));
            }
        }

        for (key, value) in arg_map {
            match schema.parameters.properties.get(key) {
                Some(_) if value.is_null() => {}
                Some(property) => {
                    if let Err(e) = property.validate(value) {
                        problems.push(format!("Parameter '{}': {}", key, e));
                    }
                }
                None => problems.push(format!("Unknown parameter: {}", key)),
            }
        }

        Ok(problems)
    }

    /// Plain-text tool listing for models without native function calling.
    ///
    /// If `allowed_tools` is Some, only those tools are listed, in the given order.
    pub fn generate_prompt(&self, allowed_tools: Option<&[String]>) -> String {
        let schemas: Vec<&ToolSchema> = match allowed_tools {
            Some(allowed) => allowed.iter().filter_map(|name| self.get(name)).collect(),
            None => self.schemas.iter().collect(),
        };

        if schemas.is_empty() {
            return String::new();
        }

        let mut lines = Vec::with_capacity(schemas.len() + 1);
        lines.push("Available tools:".to_string());
        lines.extend(schemas.iter().map(|s| s.to_prompt_line()));
        lines.join("\n")
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::schema::{ParameterSchema, PropertySchema};
    use serde_json::json;

    fn sample_schema() -> ToolSchema {
        ToolSchema::new(
            "lookup_term",
            "Look up a term",
            ParameterSchema::new()
                .required("term", PropertySchema::string("Term"))
                .optional("limit", PropertySchema::integer("Max results")),
        )
    }

    #[test]
    fn test_builtin_catalog_order() {
        let catalog = ToolCatalog::builtin();
        assert_eq!(
            catalog.list_names(),
            vec![
                "search_health_records",
                "get_biomarker_history",
                "get_user_profile",
                "get_recent_labs",
                "get_medications",
                "get_event_details",
            ]
        );
        assert!(catalog.is_known("get_event_details"));
        assert!(!catalog.is_known("drop_tables"));
    }

    #[test]
    fn test_register_rejects_empty_and_duplicate() {
        let mut catalog = ToolCatalog::new();
        catalog.register(sample_schema()).unwrap();
        assert!(catalog.register(sample_schema()).is_err());

        let mut blank = sample_schema();
        blank.name = " ".to_string();
        assert!(catalog.register(blank).is_err());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_validate_args() {
        let mut catalog = ToolCatalog::new();
        catalog.register(sample_schema()).unwrap();

        let ok = catalog.validate_args("lookup_term", &json!({"term": "x"})).unwrap();
        assert!(ok.is_empty(), "Expected no problems, got: {:?}", ok);

        let problems = catalog
            .validate_args("lookup_term", &json!({"limit": "ten", "bogus": 1}))
            .unwrap();
        assert_eq!(problems.len(), 3);
        assert!(problems.iter().any(|p| p.contains("Missing required parameter: term")));
        assert!(problems.iter().any(|p| p.contains("expected integer")));
        assert!(problems.iter().any(|p| p.contains("Unknown parameter: bogus")));
    }

    #[test]
    fn test_validate_args_unknown_tool() {
        let catalog = ToolCatalog::new();
        let err = catalog.validate_args("nope", &json!({})).unwrap_err();
        assert_eq!(err.tool_message(), "Unknown tool: nope");
    }

    #[test]
    fn test_generate_prompt() {
        let mut catalog = ToolCatalog::new();
        catalog.register(sample_schema()).unwrap();

        let prompt = catalog.generate_prompt(None);
        assert!(prompt.starts_with("Available tools:\n"));
        assert!(prompt.contains("- lookup_term(limit?: integer, term: string): Look up a term"));
        assert!(catalog
            .generate_prompt(Some(&["missing".to_string()]))
            .is_empty());
    }
}
