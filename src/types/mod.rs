//! Core types shared across the crate.
//!
//! - **IDs**: Strongly-typed identifiers (UserId, EventId, CallId)
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Limit bounds, trend threshold, timeouts, logging

mod config;
mod errors;
mod ids;

pub use config::{Config, LimitBounds, ObservabilityConfig, ToolsConfig};
pub use errors::{Error, Result, StoreError, GENERIC_FAILURE_MESSAGE};
pub use ids::{CallId, EventId, UserId};
