//! # Health Tools Core - Tool-Calling Engine for a Health-History Assistant
//!
//! A language model answers questions about a user's health history by calling a
//! fixed catalog of read-only tools. This crate provides:
//! - Tool schemas and their OpenAI- and Gemini-style wire envelopes
//! - Lenient coercion of untyped, model-supplied arguments with clamped limits
//! - Per-tool handlers whose every store query is scoped to the caller
//! - Biomarker synonym resolution against a standards catalog
//! - Trend classification over measurement series
//! - Stable per-type response shapes for heterogeneous health events
//!
//! ## Architecture
//!
//! ```text
//!   orchestrator ─▶ ToolExecutor ─▶ HealthTool handler ─▶ HealthStore (external)
//!                        │                 │
//!                   ToolCatalog     biomarkers / trend / format
//! ```
//!
//! Every failure comes back as `{"success": false, "error": "<message>"}`; nothing
//! raw (panics, store internals) reaches the model.

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod biomarkers;
pub mod format;
pub mod records;
pub mod store;
pub mod tools;
pub mod trend;
pub mod types;

// Internal utilities
pub mod observability;

pub use store::{HealthStore, InMemoryStore};
pub use tools::{ToolCatalog, ToolExecutor, ToolResult};
pub use types::{Config, Error, Result, UserId};
