//! Per-tool handlers.
//!
//! Each handler reads its arguments through [`ToolArgs`], queries the store on
//! behalf of [`HandlerContext::caller`] only, and returns the tool's `data` payload.
//! Argument problems are reported as [`Error::Validation`](crate::types::Error)
//! before the store is touched.

mod biomarker_history;
mod event_details;
mod medications;
mod profile;
mod recent_labs;
mod search;

use super::args::ToolArgs;
use super::schema::ToolSchema;
use crate::biomarkers::TermMatcher;
use crate::store::HealthStore;
use crate::trend::TrendCalculator;
use crate::types::{Result, ToolsConfig, UserId};
use chrono::NaiveDate;
use serde_json::Value;

pub use event_details::EVENT_NOT_FOUND;
pub use profile::{ProfileSection, NO_PROFILE_MESSAGE};
pub use search::sanitize_search_text;

/// Everything a handler may use. Built fresh for each call.
#[allow(missing_debug_implementations)]
pub struct HandlerContext<'a> {
    /// Owner of every record read during this call.
    pub caller: &'a UserId,
    pub store: &'a dyn HealthStore,
    pub config: &'a ToolsConfig,
    pub matcher: &'a dyn TermMatcher,
    pub trend: TrendCalculator,
    /// Reference date for age calculation.
    pub today: NaiveDate,
}

/// The built-in tools, in the order they are offered to a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthTool {
    SearchHealthRecords,
    GetBiomarkerHistory,
    GetUserProfile,
    GetRecentLabs,
    GetMedications,
    GetEventDetails,
}

impl HealthTool {
    pub const ALL: [HealthTool; 6] = [
        HealthTool::SearchHealthRecords,
        HealthTool::GetBiomarkerHistory,
        HealthTool::GetUserProfile,
        HealthTool::GetRecentLabs,
        HealthTool::GetMedications,
        HealthTool::GetEventDetails,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HealthTool::SearchHealthRecords => "search_health_records",
            HealthTool::GetBiomarkerHistory => "get_biomarker_history",
            HealthTool::GetUserProfile => "get_user_profile",
            HealthTool::GetRecentLabs => "get_recent_labs",
            HealthTool::GetMedications => "get_medications",
            HealthTool::GetEventDetails => "get_event_details",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn schema(self) -> ToolSchema {
        match self {
            HealthTool::SearchHealthRecords => search::schema(self.name()),
            HealthTool::GetBiomarkerHistory => biomarker_history::schema(self.name()),
            HealthTool::GetUserProfile => profile::schema(self.name()),
            HealthTool::GetRecentLabs => recent_labs::schema(self.name()),
            HealthTool::GetMedications => medications::schema(self.name()),
            HealthTool::GetEventDetails => event_details::schema(self.name()),
        }
    }

    /// Run this tool's handler.
    pub async fn dispatch(self, ctx: &HandlerContext<'_>, args: ToolArgs<'_>) -> Result<Value> {
        match self {
            HealthTool::SearchHealthRecords => search::handle(ctx, args).await,
            HealthTool::GetBiomarkerHistory => biomarker_history::handle(ctx, args).await,
            HealthTool::GetUserProfile => profile::handle(ctx, args).await,
            HealthTool::GetRecentLabs => recent_labs::handle(ctx, args).await,
            HealthTool::GetMedications => medications::handle(ctx, args).await,
            HealthTool::GetEventDetails => event_details::handle(ctx, args).await,
        }
    }
}
