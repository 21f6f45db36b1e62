//! Response shapes for health events.
//!
//! [`format_event`] is the single mapping from a stored event to the object the
//! model sees. Every tool that returns events goes through it, so the same record
//! always renders the same way.

use crate::records::{BiomarkerValue, EventKind, HealthEvent};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Flag reported when a measurement was stored without one.
pub const DEFAULT_BIOMARKER_FLAG: &str = "normal";

/// A lab measurement as returned to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedBiomarker {
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub flag: String,
    pub reference_range: Option<String>,
}

impl From<&BiomarkerValue> for FormattedBiomarker {
    fn from(value: &BiomarkerValue) -> Self {
        Self {
            name: value.name.clone(),
            value: value.value,
            unit: value.unit.clone(),
            flag: value
                .flag
                .clone()
                .unwrap_or_else(|| DEFAULT_BIOMARKER_FLAG.to_string()),
            reference_range: value.reference_range(),
        }
    }
}

pub fn format_biomarkers(values: Option<&[BiomarkerValue]>) -> Vec<FormattedBiomarker> {
    values
        .unwrap_or_default()
        .iter()
        .map(FormattedBiomarker::from)
        .collect()
}

/// Map an event to its response object: base fields plus the variant's own fields.
pub fn format_event(event: &HealthEvent) -> Value {
    let mut out = Map::new();
    out.insert("id".into(), json!(event.id));
    out.insert("type".into(), json!(event.type_name()));
    out.insert("date".into(), json!(event.date));
    out.insert("title".into(), json!(event.title));
    out.insert("notes".into(), json!(event.notes));
    out.insert("tags".into(), json!(event.tags));

    let extra = match &event.kind {
        EventKind::LabResult(lab) => json!({
            "labName": lab.lab_name,
            "orderingDoctor": lab.ordering_doctor,
            "biomarkers": format_biomarkers(lab.biomarkers.as_deref()),
        }),
        EventKind::DoctorVisit(visit) => json!({
            "doctorName": visit.doctor_name,
            "specialty": visit.specialty,
            "facility": visit.facility,
            "diagnosis": visit.diagnosis,
            "followUp": visit.follow_up,
        }),
        EventKind::Medication(med) => json!({
            "medicationName": med.medication_name,
            "dosage": med.dosage,
            "frequency": med.frequency,
            "prescriber": med.prescriber,
            "reason": med.reason,
            "startDate": med.start_date,
            "endDate": med.end_date,
            "isActive": med.is_active,
            "sideEffects": med.side_effects,
        }),
        EventKind::Intervention(intervention) => json!({
            "interventionName": intervention.intervention_name,
            "category": intervention.category,
            "protocol": intervention.protocol,
            "startDate": intervention.start_date,
            "endDate": intervention.end_date,
        }),
        EventKind::Metric(metric) => json!({
            "metricName": metric.metric_name,
            "value": metric.value,
            "unit": metric.unit,
            "source": metric.source,
        }),
        EventKind::Vice(vice) => json!({
            "viceCategory": vice.vice_category,
            "quantity": vice.quantity,
            "unit": vice.unit,
            "context": vice.context,
        }),
        EventKind::Other => Value::Null,
    };

    if let Value::Object(fields) = extra {
        out.extend(fields);
    }
    Value::Object(out)
}
