//! End-to-end tool execution against the in-memory store.

use chrono::NaiveDate;
use health_tools_core::store::StoreSnapshot;
use health_tools_core::tools::{ToolCall, ToolResult, NO_PROFILE_MESSAGE};
use health_tools_core::{InMemoryStore, ToolExecutor, UserId};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn alice() -> UserId {
    UserId::try_from("alice").unwrap()
}

fn bob() -> UserId {
    UserId::try_from("bob").unwrap()
}

fn executor() -> ToolExecutor {
    ToolExecutor::default().with_today(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap())
}

/// Alice has two A1c labs (recorded under different names), one lab still being
/// processed, a visit, two medications and a profile. Bob has one private lab.
fn store() -> InMemoryStore {
    let snapshot: StoreSnapshot = serde_json::from_value(json!({
        "biomarker_standards": [
            {"code": "a1c", "name": "Hemoglobin A1c", "aliases": ["hba1c"], "category": "metabolic"},
            {"code": "ldl", "name": "LDL Cholesterol", "aliases": ["bad cholesterol"], "category": "lipids"}
        ],
        "events": [
            {"id": "lab-2023", "user_id": "alice", "type": "lab_result", "date": "2023-09-12",
             "title": "Annual physical labs", "lab_name": "Quest Diagnostics",
             "biomarkers": [
                {"name": "A1c", "value": 5.0, "unit": "%", "ref_min": 4.0, "ref_max": 5.6},
                {"name": "LDL", "value": 142.0, "unit": "mg/dL", "flag": "high"}
             ]},
            {"id": "lab-2024", "user_id": "alice", "type": "lab_result", "date": "2024-09-10",
             "title": "Annual physical labs", "lab_name": "LabCorp", "ordering_doctor": "Dr. Rivera",
             "biomarkers": [
                {"name": "Hemoglobin A1c", "value": 5.5, "unit": "%", "flag": "normal"}
             ]},
            {"id": "lab-pending", "user_id": "alice", "type": "lab_result", "date": "2024-09-20",
             "title": "Thyroid panel"},
            {"id": "visit-1", "user_id": "alice", "type": "doctor_visit", "date": "2024-05-02",
             "title": "Cardiology consult", "doctor_name": "Dr. Rivera", "specialty": "cardiology",
             "notes": "Discussed 100% adherence to statin"},
            {"id": "med-active", "user_id": "alice", "type": "medication", "date": "2024-05-03",
             "title": "Statin", "medication_name": "Atorvastatin", "dosage": "20mg", "is_active": true},
            {"id": "med-stopped", "user_id": "alice", "type": "medication", "date": "2022-01-10",
             "title": "Metformin trial", "is_active": false},
            {"id": "bob-lab", "user_id": "bob", "type": "lab_result", "date": "2024-08-01",
             "title": "Bob's labs", "biomarkers": [{"name": "HbA1c", "value": 7.9, "unit": "%"}]}
        ],
        "profiles": [
            {"user_id": "alice", "date_of_birth": "1985-10-02", "sex": "female",
             "height_cm": 165.0, "weight_kg": 60.0, "allergies": ["penicillin"],
             "conditions": ["hypercholesterolemia"]}
        ]
    }))
    .unwrap();
    InMemoryStore::from_snapshot(snapshot)
}

async fn run(name: &str, args: Value, caller: &UserId) -> ToolResult {
    executor().execute(name, &args, caller, &store()).await
}

fn ids(events: &Value) -> Vec<&str> {
    events
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect()
}

// =============================================================================
// Biomarker history
// =============================================================================

#[tokio::test]
async fn test_alias_query_finds_measurements_under_other_names() {
    let result = run("get_biomarker_history", json!({"biomarker_name": "hba1c"}), &alice()).await;
    let data = result.data().unwrap();

    assert_eq!(data["biomarker"], "hba1c");
    assert_eq!(data["count"], 2);
    assert_eq!(data["measurements"][0]["name"], "A1c");
    assert_eq!(data["measurements"][0]["date"], "2023-09-12");
    assert_eq!(data["measurements"][0]["referenceRange"], "4-5.6");
    assert_eq!(data["measurements"][1]["labName"], "LabCorp");
    assert_eq!(data["trend"], "increasing (+10.0%)");
    assert_eq!(data["dateRange"], json!({"from": "2023-09-12", "to": "2024-09-10"}));
}

#[tokio::test]
async fn test_code_query_matches_itself() {
    let result = run("get_biomarker_history", json!({"biomarker_name": "LDL"}), &alice()).await;
    let data = result.data().unwrap();

    assert_eq!(data["count"], 1);
    assert_eq!(data["measurements"][0]["flag"], "high");
    assert!(data["trend"].is_null());
}

#[tokio::test]
async fn test_unknown_biomarker_is_empty_not_error() {
    let result = run("get_biomarker_history", json!({"biomarker_name": "ferritin"}), &alice()).await;
    let data = result.data().unwrap();

    assert_eq!(data["count"], 0);
    assert!(data["trend"].is_null());
    assert!(data["dateRange"].is_null());
}

#[tokio::test]
async fn test_other_users_measurements_never_leak() {
    let result = run("get_biomarker_history", json!({"biomarker_name": "hba1c"}), &bob()).await;
    let data = result.data().unwrap();

    assert_eq!(data["count"], 1);
    assert_eq!(data["measurements"][0]["value"], 7.9);
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_matches_doctor_name() {
    let result = run("search_health_records", json!({"query": "rivera"}), &alice()).await;
    let data = result.data().unwrap();

    // ordering doctor on a lab is not a searched column
    assert_eq!(ids(&data["events"]), vec!["visit-1"]);
    assert_eq!(data["count"], 1);
    assert_eq!(data["query"], "rivera");
    assert_eq!(data["filters"]["limit"], 20);
}

#[tokio::test]
async fn test_search_title_newest_first() {
    let result = run("search_health_records", json!({"query": "annual PHYSICAL"}), &alice()).await;
    assert_eq!(
        ids(&result.data().unwrap()["events"]),
        vec!["lab-2024", "lab-2023"]
    );
}

#[tokio::test]
async fn test_search_wildcards_are_inert() {
    let result = run("search_health_records", json!({"query": "100%"}), &alice()).await;
    assert_eq!(ids(&result.data().unwrap()["events"]), vec!["visit-1"]);

    let result = run("search_health_records", json!({"query": "%"}), &alice()).await;
    assert_eq!(result.data().unwrap()["count"], 6);
}

#[tokio::test]
async fn test_search_type_and_date_filters() {
    let args = json!({
        "event_types": ["lab_result"],
        "start_date": "2024-01-01",
        "end_date": "2024-09-20"
    });
    let result = run("search_health_records", args, &alice()).await;
    assert_eq!(
        ids(&result.data().unwrap()["events"]),
        vec!["lab-pending", "lab-2024"]
    );

    let result = run("search_health_records", json!({"event_types": ["surgery"]}), &alice()).await;
    assert_eq!(result.data().unwrap()["count"], 0);
}

#[tokio::test]
async fn test_search_limit_and_bad_date() {
    let result = run("search_health_records", json!({"limit": 2}), &alice()).await;
    assert_eq!(result.data().unwrap()["count"], 2);

    let result = run("search_health_records", json!({"start_date": "yesterday"}), &alice()).await;
    assert_eq!(
        result,
        ToolResult::failure("start_date must be a date in YYYY-MM-DD format")
    );
}

// =============================================================================
// Profile
// =============================================================================

#[tokio::test]
async fn test_profile_single_section() {
    let result = run("get_user_profile", json!({"sections": ["allergies"]}), &alice()).await;
    assert_eq!(
        result.data().unwrap(),
        &json!({"profile": {"allergies": ["penicillin"]}})
    );
}

#[tokio::test]
async fn test_profile_all_sections_with_derived_fields() {
    let result = run("get_user_profile", json!({}), &alice()).await;
    let profile = &result.data().unwrap()["profile"];

    assert_eq!(profile.as_object().unwrap().len(), 6);
    // birthday is tomorrow relative to the pinned date
    assert_eq!(profile["basic"]["age"], 38);
    assert_eq!(profile["basic"]["bmi"], 22.0);
    assert!(profile["surgeries"].is_null());
}

#[tokio::test]
async fn test_missing_profile_is_success() {
    let result = run("get_user_profile", json!({"sections": "all"}), &bob()).await;
    assert_eq!(
        result,
        ToolResult::success(json!({"profile": null, "message": NO_PROFILE_MESSAGE}))
    );
}

// =============================================================================
// Labs, medications, details
// =============================================================================

#[tokio::test]
async fn test_recent_labs_newest_first_with_default_flag() {
    let result = run("get_recent_labs", json!({"limit": 100}), &alice()).await;
    let data = result.data().unwrap();

    assert_eq!(ids(&data["labs"]), vec!["lab-pending", "lab-2024", "lab-2023"]);
    let first_2023 = &data["labs"][2]["biomarkers"][0];
    assert_eq!(first_2023["flag"], "normal");
    assert_eq!(first_2023["referenceRange"], "4-5.6");
    assert_eq!(data["labs"][0]["biomarkers"], json!([]));
}

#[tokio::test]
async fn test_medications_active_by_default() {
    let result = run("get_medications", json!({}), &alice()).await;
    let data = result.data().unwrap();
    assert_eq!(data["count"], 1);
    assert_eq!(data["medications"][0]["name"], "Atorvastatin");
    assert_eq!(data["activeOnly"], true);

    let result = run("get_medications", json!({"active_only": false}), &alice()).await;
    let data = result.data().unwrap();
    assert_eq!(data["count"], 2);
    assert_eq!(data["medications"][1]["name"], "Metformin trial");
}

#[tokio::test]
async fn test_event_details_requires_ownership() {
    let result = run("get_event_details", json!({"event_id": "bob-lab"}), &alice()).await;
    assert_eq!(result, ToolResult::failure("Event not found"));

    let result = run("get_event_details", json!({"event_id": "missing-id"}), &alice()).await;
    assert_eq!(result, ToolResult::failure("Event not found"));
}

#[tokio::test]
async fn test_detail_and_search_render_identically() {
    let detail = run("get_event_details", json!({"event_id": "lab-2024"}), &alice()).await;
    let search = run(
        "search_health_records",
        json!({"query": "LabCorp", "event_types": ["lab_result"]}),
        &alice(),
    )
    .await;

    assert_eq!(
        detail.data().unwrap()["event"],
        search.data().unwrap()["events"][0]
    );
}

// =============================================================================
// Executor-level properties
// =============================================================================

#[tokio::test]
async fn test_identical_calls_are_byte_identical() {
    let executor = executor();
    let store = store();
    let call = ToolCall::new("search_health_records", json!({"query": "labs"}));

    let first = executor.execute_call(&call, &alice(), &store).await;
    let second = executor.execute_call(&call, &alice(), &store).await;
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let executor = executor();
    let store = store();
    let caller = alice();

    let labs_args = json!({"limit": 1});
    let meds_args = json!({});
    let weather_args = json!({});
    let (labs, meds, unknown) = tokio::join!(
        executor.execute("get_recent_labs", &labs_args, &caller, &store),
        executor.execute("get_medications", &meds_args, &caller, &store),
        executor.execute("get_weather", &weather_args, &caller, &store),
    );

    assert_eq!(labs.data().unwrap()["count"], 1);
    assert_eq!(meds.data().unwrap()["count"], 1);
    assert_eq!(unknown, ToolResult::failure("Unknown tool: get_weather"));
}

#[tokio::test]
async fn test_result_wire_shape() {
    let result = run("get_event_details", json!({}), &alice()).await;
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"success": false, "error": "event_id is required"})
    );
}
