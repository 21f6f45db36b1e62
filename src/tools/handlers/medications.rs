//! Medication list.

use super::HandlerContext;
use crate::records::{EventType, HealthEvent};
use crate::store::EventQuery;
use crate::tools::args::ToolArgs;
use crate::tools::schema::{ParameterSchema, PropertySchema, ToolSchema};
use crate::types::Result;
use serde_json::{json, Value};

pub(super) fn schema(name: &str) -> ToolSchema {
    ToolSchema::new(
        name,
        "List the user's medications and supplements with dosage, frequency, prescriber \
         and reason. Only active medications are returned unless active_only is false.",
        ParameterSchema::new().optional(
            "active_only",
            PropertySchema::boolean("Only include medications currently taken (default true)"),
        ),
    )
}

fn medication_entry(event: &HealthEvent) -> Option<Value> {
    let med = event.as_medication()?;
    Some(json!({
        "id": event.id,
        "name": med.medication_name.as_deref().unwrap_or(&event.title),
        "dosage": med.dosage,
        "frequency": med.frequency,
        "prescriber": med.prescriber,
        "reason": med.reason,
        "startDate": med.start_date,
        "endDate": med.end_date,
        "isActive": med.is_active,
        "sideEffects": med.side_effects,
        "notes": event.notes,
    }))
}

pub(super) async fn handle(ctx: &HandlerContext<'_>, args: ToolArgs<'_>) -> Result<Value> {
    let active_only = args.bool_or("active_only", true);

    let query = EventQuery::new()
        .of_types([EventType::Medication])
        .active_medications_only(active_only);
    let events = ctx.store.query_events(ctx.caller, &query).await?;
    let medications: Vec<Value> = events.iter().filter_map(medication_entry).collect();

    Ok(json!({
        "medications": medications,
        "count": medications.len(),
        "activeOnly": active_only,
    }))
}
