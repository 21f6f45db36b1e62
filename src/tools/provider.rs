//! Provider wire formats for the tool catalog.
//!
//! Both formats embed each tool's `parameters` object exactly as the schema
//! defines it; only the envelope around it differs.

use super::catalog::ToolCatalog;
use super::schema::{ParameterSchema, ToolSchema};
use crate::types::Result;
use serde::Serialize;
use serde_json::Value;

/// Model provider families with distinct tool envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// `[{type: "function", function: {..}}, ..]`
    OpenAi,
    /// `[{functionDeclarations: [..]}]`
    Gemini,
}

impl Provider {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(Provider::OpenAi),
            "gemini" | "google" => Some(Provider::Gemini),
            _ => None,
        }
    }
}

/// `{name, description, parameters}` shared by both envelopes.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDeclaration<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub parameters: &'a ParameterSchema,
}

impl<'a> From<&'a ToolSchema> for FunctionDeclaration<'a> {
    fn from(schema: &'a ToolSchema) -> Self {
        Self {
            name: &schema.name,
            description: &schema.description,
            parameters: &schema.parameters,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum OpenAiTool<'a> {
    #[serde(rename = "web_search_preview")]
    WebSearchPreview,
    #[serde(rename = "function")]
    Function { function: FunctionDeclaration<'a> },
}

/// Serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EmptyObject {}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GeminiTool<'a> {
    GoogleSearch {
        #[serde(rename = "googleSearch")]
        google_search: EmptyObject,
    },
    FunctionDeclarations {
        #[serde(rename = "functionDeclarations")]
        function_declarations: Vec<FunctionDeclaration<'a>>,
    },
}

impl ToolCatalog {
    /// One function entry per tool, optionally preceded by the built-in web search marker.
    pub fn to_openai_format(&self, include_web_search: bool) -> Vec<OpenAiTool<'_>> {
        let mut tools = Vec::with_capacity(self.len() + 1);
        if include_web_search {
            tools.push(OpenAiTool::WebSearchPreview);
        }
        tools.extend(self.schemas().iter().map(|schema| OpenAiTool::Function {
            function: schema.into(),
        }));
        tools
    }

    /// Optional search marker followed by exactly one declarations entry.
    pub fn to_gemini_format(&self, include_google_search: bool) -> Vec<GeminiTool<'_>> {
        let mut tools = Vec::with_capacity(2);
        if include_google_search {
            tools.push(GeminiTool::GoogleSearch {
                google_search: EmptyObject {},
            });
        }
        tools.push(GeminiTool::FunctionDeclarations {
            function_declarations: self.schemas().iter().map(Into::into).collect(),
        });
        tools
    }

    /// Provider envelope as JSON.
    pub fn for_provider(&self, provider: Provider, include_builtin_search: bool) -> Result<Value> {
        let value = match provider {
            Provider::OpenAi => serde_json::to_value(self.to_openai_format(include_builtin_search))?,
            Provider::Gemini => serde_json::to_value(self.to_gemini_format(include_builtin_search))?,
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_openai_envelope() {
        let catalog = ToolCatalog::builtin();
        let value = catalog.for_provider(Provider::OpenAi, true).unwrap();
        let entries = value.as_array().unwrap();

        assert_eq!(entries.len(), catalog.len() + 1);
        assert_eq!(entries[0], json!({"type": "web_search_preview"}));
        assert_eq!(entries[1]["type"], "function");
        assert_eq!(entries[1]["function"]["name"], "search_health_records");

        let without = catalog.for_provider(Provider::OpenAi, false).unwrap();
        assert_eq!(without.as_array().unwrap().len(), catalog.len());
        assert_eq!(without[0]["type"], "function");
    }

    #[test]
    fn test_gemini_envelope() {
        let catalog = ToolCatalog::builtin();
        let value = catalog.for_provider(Provider::Gemini, true).unwrap();
        let entries = value.as_array().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], json!({"googleSearch": {}}));
        let declarations = entries[1]["functionDeclarations"].as_array().unwrap();
        assert_eq!(declarations.len(), catalog.len());

        let without = catalog.for_provider(Provider::Gemini, false).unwrap();
        assert_eq!(without.as_array().unwrap().len(), 1);
        assert!(without[0].get("functionDeclarations").is_some());
    }

    #[test]
    fn test_parameters_identical_across_providers() {
        let catalog = ToolCatalog::builtin();
        let openai = catalog.for_provider(Provider::OpenAi, false).unwrap();
        let gemini = catalog.for_provider(Provider::Gemini, false).unwrap();
        let declarations = gemini[0]["functionDeclarations"].as_array().unwrap();

        for (i, schema) in catalog.schemas().iter().enumerate() {
            let expected = serde_json::to_value(&schema.parameters).unwrap();
            assert_eq!(openai[i]["function"]["parameters"], expected);
            assert_eq!(declarations[i]["parameters"], expected);
            assert_eq!(declarations[i]["name"], schema.name.as_str());
        }
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!(Provider::parse("OpenAI"), Some(Provider::OpenAi));
        assert_eq!(Provider::parse("google"), Some(Provider::Gemini));
        assert_eq!(Provider::parse("other"), None);
    }
}
