//! Tool infrastructure: schemas, catalog, provider formats, argument coercion,
//! per-tool handlers and the executor that ties them together.
//!
//! The catalog owns what the model is told; the handlers own what actually runs.
//! [`ToolExecutor`] is the only entry point for running a tool.

pub mod args;
pub mod catalog;
pub mod executor;
pub mod handlers;
pub mod provider;
pub mod result;
pub mod schema;

pub use args::ToolArgs;
pub use catalog::ToolCatalog;
pub use executor::ToolExecutor;
pub use handlers::{HealthTool, ProfileSection, EVENT_NOT_FOUND, NO_PROFILE_MESSAGE};
pub use provider::{GeminiTool, OpenAiTool, Provider};
pub use result::{ToolCall, ToolResult};
pub use schema::{JsonType, ParameterSchema, PropertySchema, ToolSchema};
