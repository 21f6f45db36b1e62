//! Single event lookup.

use super::HandlerContext;
use crate::format::format_event;
use crate::tools::args::ToolArgs;
use crate::tools::schema::{ParameterSchema, PropertySchema, ToolSchema};
use crate::types::{Error, EventId, Result};
use serde_json::{json, Value};

pub const EVENT_NOT_FOUND: &str = "Event not found";

pub(super) fn schema(name: &str) -> ToolSchema {
    ToolSchema::new(
        name,
        "Get the full details of one health event by its id, as returned by other tools.",
        ParameterSchema::new().required("event_id", PropertySchema::string("Event id")),
    )
}

pub(super) async fn handle(ctx: &HandlerContext<'_>, args: ToolArgs<'_>) -> Result<Value> {
    let raw_id = args.required_str("event_id")?;
    let event_id = EventId::try_from(raw_id).map_err(Error::validation)?;

    let event = ctx
        .store
        .get_event(ctx.caller, &event_id)
        .await?
        .ok_or_else(|| Error::not_found(EVENT_NOT_FOUND))?;

    Ok(json!({ "event": format_event(&event) }))
}
