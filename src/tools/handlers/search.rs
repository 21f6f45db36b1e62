//! Free-text timeline search.

use super::HandlerContext;
use crate::format::format_event;
use crate::records::{EventType, SearchField};
use crate::store::EventQuery;
use crate::tools::args::ToolArgs;
use crate::tools::schema::{ParameterSchema, PropertySchema, ToolSchema};
use crate::types::Result;
use serde_json::{json, Value};

const KEPT_PUNCTUATION: &[char] = &['-', '.', '\'', '/', '&', '+', '#'];

/// Strip wildcard and filter-syntax characters, collapse whitespace.
pub fn sanitize_search_text(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || KEPT_PUNCTUATION.contains(c))
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(super) fn schema(name: &str) -> ToolSchema {
    ToolSchema::new(
        name,
        "Search the user's health timeline (lab results, doctor visits, medications, \
         interventions, metrics, habits) by keyword, event type and date range. \
         Returns the most recent matching events first.",
        ParameterSchema::new()
            .optional(
                "query",
                PropertySchema::string(
                    "Keywords matched against titles, notes, doctor, medication and lab names",
                ),
            )
            .optional(
                "event_types",
                PropertySchema::array_of(
                    PropertySchema::string("").with_enum(EventType::ALL.map(EventType::as_str)),
                    "Only return events of these types",
                ),
            )
            .optional(
                "start_date",
                PropertySchema::string("Earliest event date to include (YYYY-MM-DD)"),
            )
            .optional(
                "end_date",
                PropertySchema::string("Latest event date to include (YYYY-MM-DD)"),
            )
            .optional(
                "limit",
                PropertySchema::integer("Maximum number of events to return (1-50, default 20)"),
            ),
    )
}

pub(super) async fn handle(ctx: &HandlerContext<'_>, args: ToolArgs<'_>) -> Result<Value> {
    let limit = args.limit("limit", ctx.config.search_limit);
    let start_date = args.date("start_date")?;
    let end_date = args.date("end_date")?;
    let raw_query = args.str("query").map(str::trim).filter(|q| !q.is_empty());
    let event_types = args.string_list("event_types").filter(|t| !t.is_empty());

    let mut query = EventQuery::new().between(start_date, end_date).limit(limit);
    if let Some(needle) = raw_query.map(sanitize_search_text).filter(|s| !s.is_empty()) {
        query = query.containing(needle, &SearchField::TIMELINE);
    }
    if let Some(types) = &event_types {
        // unrecognized names stay in the filter's semantics: they match nothing
        query = query.of_types(types.iter().filter_map(|t| EventType::parse(t)));
    }

    let events = ctx.store.query_events(ctx.caller, &query).await?;
    let formatted: Vec<Value> = events.iter().map(format_event).collect();

    Ok(json!({
        "events": formatted,
        "count": formatted.len(),
        "query": raw_query,
        "filters": {
            "eventTypes": event_types,
            "startDate": start_date,
            "endDate": end_date,
            "limit": limit,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_wildcards_and_filter_syntax() {
        assert_eq!(sanitize_search_text("vitamin%_d*"), "vitamind");
        assert_eq!(sanitize_search_text("title.ilike.*x*,notes(eq)"), "title.ilike.xnoteseq");
        assert_eq!(sanitize_search_text("  Dr.  O'Brien  "), "Dr. O'Brien");
        assert_eq!(sanitize_search_text("%%%"), "");
    }

    #[test]
    fn test_sanitize_keeps_unicode_letters() {
        assert_eq!(sanitize_search_text("Médecin généraliste"), "Médecin généraliste");
    }
}
