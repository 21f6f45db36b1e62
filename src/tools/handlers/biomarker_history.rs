//! Biomarker history with synonym resolution and trend.

use super::HandlerContext;
use crate::biomarkers::extract_measurements;
use crate::records::EventType;
use crate::store::{EventQuery, SortOrder};
use crate::tools::args::ToolArgs;
use crate::tools::schema::{ParameterSchema, PropertySchema, ToolSchema};
use crate::types::Result;
use serde_json::{json, Value};

pub(super) fn schema(name: &str) -> ToolSchema {
    ToolSchema::new(
        name,
        "Get every recorded value of one biomarker over time, oldest first, with the \
         overall trend. Common synonyms and abbreviations are resolved automatically \
         (e.g. 'hba1c' finds 'Hemoglobin A1c').",
        ParameterSchema::new().required(
            "biomarker_name",
            PropertySchema::string("Biomarker name, code or common alias"),
        ),
    )
}

pub(super) async fn handle(ctx: &HandlerContext<'_>, args: ToolArgs<'_>) -> Result<Value> {
    let biomarker = args.required_str("biomarker_name")?;

    let standards = ctx.store.biomarker_standards().await?;
    let terms = ctx.matcher.resolve(biomarker, &standards);
    tracing::debug!(
        biomarker = terms.query(),
        term_count = terms.len(),
        "biomarker_terms_resolved"
    );

    let query = EventQuery::new()
        .of_types([EventType::LabResult])
        .with_biomarkers()
        .ordered(SortOrder::DateAscending);
    let labs = ctx.store.query_events(ctx.caller, &query).await?;

    let measurements = extract_measurements(&labs, &terms, ctx.matcher);
    let values: Vec<f64> = measurements.iter().map(|m| m.value).collect();
    let trend = ctx.trend.classify(&values);

    let date_range = match (measurements.first(), measurements.last()) {
        (Some(first), Some(last)) => json!({ "from": first.date, "to": last.date }),
        _ => Value::Null,
    };

    Ok(json!({
        "biomarker": biomarker,
        "measurements": measurements,
        "count": measurements.len(),
        "trend": trend,
        "dateRange": date_range,
    }))
}
