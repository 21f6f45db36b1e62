//! Tool executor: catalog check, dispatch, outcome normalization.
//!
//! ```text
//!  orchestrator ──execute(name, args, caller, store)──▶ ToolExecutor
//!                                                        │ unknown name → Failure, store untouched
//!                                                        ▼
//!                                                  HealthTool::dispatch
//!                                                        │ (resolver / trend / formatter)
//!                                                        ▼
//!                                                  HealthStore, scoped to caller
//! ```
//!
//! Errors, panics and timeouts are all caught here, once, and become
//! `{"success": false, "error": <message>}`.

use super::args::ToolArgs;
use super::catalog::ToolCatalog;
use super::handlers::{HandlerContext, HealthTool};
use super::result::{ToolCall, ToolResult};
use crate::biomarkers::{SubstringMatcher, TermMatcher};
use crate::store::HealthStore;
use crate::trend::TrendCalculator;
use crate::types::{CallId, Error, Result, ToolsConfig, UserId};
use chrono::{NaiveDate, Utc};
use futures::FutureExt;
use serde_json::Value;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

/// Stateless executor for the built-in health tools.
///
/// Safe to share across tasks; every call is independent. Must run inside a Tokio
/// runtime with the time driver enabled (the per-call timeout uses it).
#[derive(Debug, Clone)]
pub struct ToolExecutor {
    catalog: Arc<ToolCatalog>,
    config: ToolsConfig,
    matcher: Arc<dyn TermMatcher>,
    fixed_today: Option<NaiveDate>,
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::new(ToolsConfig::default())
    }
}

impl ToolExecutor {
    pub fn new(config: ToolsConfig) -> Self {
        Self {
            catalog: Arc::new(ToolCatalog::builtin()),
            config,
            matcher: Arc::new(SubstringMatcher),
            fixed_today: None,
        }
    }

    /// Replace the biomarker matching strategy.
    pub fn with_matcher(mut self, matcher: impl TermMatcher + 'static) -> Self {
        self.matcher = Arc::new(matcher);
        self
    }

    /// Pin the reference date used for age calculation.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ToolsConfig {
        &self.config
    }

    /// Execute a [`ToolCall`] on behalf of `caller`.
    pub async fn execute_call(
        &self,
        call: &ToolCall,
        caller: &UserId,
        store: &dyn HealthStore,
    ) -> ToolResult {
        let args = Value::Object(call.arguments.clone());
        self.execute(&call.name, &args, caller, store).await
    }

    /// Execute tool `name` with model-supplied `args` on behalf of `caller`.
    ///
    /// `caller` is the only identity queries are scoped to; nothing in `args` can
    /// change it.
    pub async fn execute(
        &self,
        name: &str,
        args: &Value,
        caller: &UserId,
        store: &dyn HealthStore,
    ) -> ToolResult {
        let call_id = CallId::new();

        if !self.catalog.is_known(name) {
            tracing::warn!(call_id = %call_id, tool = name, "unknown_tool_requested");
            return ToolResult::failure(Error::unknown_tool(name).tool_message());
        }

        tracing::debug!(call_id = %call_id, tool = name, caller = %caller, "tool_call_started");
        let started = Instant::now();
        let outcome = self.run(name, args, caller, store).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(data) => {
                tracing::debug!(call_id = %call_id, tool = name, elapsed_ms, "tool_call_succeeded");
                ToolResult::success(data)
            }
            Err(err) => {
                tracing::warn!(
                    call_id = %call_id,
                    tool = name,
                    elapsed_ms,
                    error_kind = err.kind(),
                    error = %err,
                    "tool_call_failed"
                );
                ToolResult::failure(err.tool_message())
            }
        }
    }

    async fn run(
        &self,
        name: &str,
        args: &Value,
        caller: &UserId,
        store: &dyn HealthStore,
    ) -> Result<Value> {
        let tool = HealthTool::from_name(name)
            .ok_or_else(|| Error::internal(format!("No handler bound to tool: {}", name)))?;
        let tool_args = ToolArgs::parse(args)?;

        if let Ok(problems) = self.catalog.validate_args(name, args) {
            for problem in problems {
                tracing::debug!(tool = name, problem = %problem, "tool_argument_mismatch");
            }
        }

        let ctx = HandlerContext {
            caller,
            store,
            config: &self.config,
            matcher: self.matcher.as_ref(),
            trend: TrendCalculator::new(self.config.trend_stable_threshold_pct),
            today: self.fixed_today.unwrap_or_else(|| Utc::now().date_naive()),
        };

        let guarded = AssertUnwindSafe(tool.dispatch(&ctx, tool_args)).catch_unwind();
        match tokio::time::timeout(self.config.call_timeout, guarded).await {
            Ok(Ok(result)) => result,
            Ok(Err(_panic)) => {
                tracing::error!(tool = name, "tool_handler_panicked");
                Err(Error::internal(""))
            }
            Err(_elapsed) => Err(Error::timeout(format!(
                "Tool call timed out after {:?}",
                self.config.call_timeout
            ))),
        }
    }
}
