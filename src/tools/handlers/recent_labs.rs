//! Most recent lab results.

use super::HandlerContext;
use crate::format::format_event;
use crate::records::EventType;
use crate::store::EventQuery;
use crate::tools::args::ToolArgs;
use crate::tools::schema::{ParameterSchema, PropertySchema, ToolSchema};
use crate::types::Result;
use serde_json::{json, Value};

pub(super) fn schema(name: &str) -> ToolSchema {
    ToolSchema::new(
        name,
        "Get the user's most recent lab results with all measured biomarkers, flags and \
         reference ranges, newest first.",
        ParameterSchema::new().optional(
            "limit",
            PropertySchema::integer("Number of lab results to return (1-20, default 5)"),
        ),
    )
}

pub(super) async fn handle(ctx: &HandlerContext<'_>, args: ToolArgs<'_>) -> Result<Value> {
    let limit = args.limit("limit", ctx.config.recent_labs_limit);

    let query = EventQuery::new().of_types([EventType::LabResult]).limit(limit);
    let labs = ctx.store.query_events(ctx.caller, &query).await?;
    let formatted: Vec<Value> = labs.iter().map(format_event).collect();

    Ok(json!({
        "labs": formatted,
        "count": formatted.len(),
    }))
}
