//! Configuration structures.
//!
//! Defaults match the production tool contracts; a JSON file passed to
//! [`Config::load`] may override any subset of fields.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Global configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Tool execution configuration.
    #[serde(default)]
    pub tools: ToolsConfig,
}

impl Config {
    /// Load configuration from a JSON file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> crate::types::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error), used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Inclusive bounds and fallback for a numeric `limit` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitBounds {
    pub min: usize,
    pub max: usize,
    /// Used when the argument is absent, non-numeric or not positive.
    pub default: usize,
}

impl LimitBounds {
    pub const fn new(min: usize, max: usize, default: usize) -> Self {
        Self { min, max, default }
    }

    /// Clamp a requested value into `[min, max]`; `None` and zero fall back to `default`.
    ///
    /// Inverted bounds from a hand-edited config are read as `[max, min]`.
    pub fn clamp(&self, requested: Option<usize>) -> usize {
        let (low, high) = (self.min.min(self.max), self.min.max(self.max));
        match requested {
            Some(n) if n > 0 => n.clamp(low, high),
            _ => self.default.clamp(low, high),
        }
    }
}

/// Tool execution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// `limit` bounds for the timeline search tool.
    pub search_limit: LimitBounds,

    /// `limit` bounds for the recent labs tool.
    pub recent_labs_limit: LimitBounds,

    /// Absolute percentage change below which a series is reported as stable.
    pub trend_stable_threshold_pct: f64,

    /// Time budget for one tool call, store round-trips included.
    #[serde(with = "humantime_serde")]
    pub call_timeout: Duration,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            search_limit: LimitBounds::new(1, 50, 20),
            recent_labs_limit: LimitBounds::new(1, 20, 5),
            trend_stable_threshold_pct: 5.0,
            call_timeout: Duration::from_secs(30),
        }
    }
}
