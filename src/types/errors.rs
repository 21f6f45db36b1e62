//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation. Every variant
//! carries a human-readable message; [`Error::tool_message`] is the only text that
//! is ever handed back to the model.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Message returned to the model when a failure carries nothing presentable.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred while executing the tool";

/// Failure reported by a [`HealthStore`](crate::store::HealthStore) backend.
///
/// The message is surfaced to the model unmodified, so backends should keep it
/// human-readable and free of connection strings or internal codes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Main error enum for tool execution.
#[derive(Error, Debug)]
pub enum Error {
    /// Tool name absent from the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Missing, blank or malformed argument. Raised before any store access.
    #[error("validation error: {0}")]
    Validation(String),

    /// Record lookup by id and owner returned nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// Underlying data-access failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Tool call exceeded the configured time budget.
    #[error("timeout: {0}")]
    Timeout(String),

    /// Anything else raised inside a handler.
    #[error("internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience constructors
impl Error {
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(StoreError::new(msg))
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl Error {
    /// Stable machine-readable kind, used for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::UnknownTool(_) => "unknown_tool",
            Error::Validation(_) => "validation",
            Error::NotFound(_) => "not_found",
            Error::Store(_) => "store",
            Error::Timeout(_) => "timeout",
            Error::Internal(_) => "internal",
            Error::Serialization(_) => "serialization",
            Error::Io(_) => "io",
        }
    }

    /// Message handed back to the model.
    ///
    /// The inner message is returned without the variant prefix used by `Display`.
    /// A blank message collapses to [`GENERIC_FAILURE_MESSAGE`].
    pub fn tool_message(&self) -> String {
        let message = match self {
            Error::UnknownTool(_) => self.to_string(),
            Error::Validation(msg)
            | Error::NotFound(msg)
            | Error::Timeout(msg)
            | Error::Internal(msg) => msg.clone(),
            Error::Store(err) => err.message().to_string(),
            Error::Serialization(err) => err.to_string(),
            Error::Io(err) => err.to_string(),
        };

        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }
}
