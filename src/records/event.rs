//! Health event records.
//!
//! Stores keep one wide row per event with a `type` discriminator and many nullable
//! type-specific columns. Deserialization turns that row into [`HealthEvent`] with an
//! [`EventKind`] variant per discriminator, so handlers and formatters never probe
//! columns that cannot apply.

use super::BiomarkerValue;
use crate::types::{EventId, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Event discriminator, as used in tool arguments and store filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    LabResult,
    DoctorVisit,
    Medication,
    Intervention,
    Metric,
    Vice,
}

impl EventType {
    pub const ALL: [EventType; 6] = [
        EventType::LabResult,
        EventType::DoctorVisit,
        EventType::Medication,
        EventType::Intervention,
        EventType::Metric,
        EventType::Vice,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventType::LabResult => "lab_result",
            EventType::DoctorVisit => "doctor_visit",
            EventType::Medication => "medication",
            EventType::Intervention => "intervention",
            EventType::Metric => "metric",
            EventType::Vice => "vice",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|t| t.as_str().eq_ignore_ascii_case(s))
    }
}

/// Text columns covered by free-text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Notes,
    DoctorName,
    MedicationName,
    LabName,
}

impl SearchField {
    /// Fields matched by the timeline search tool, combined with OR.
    pub const TIMELINE: [SearchField; 5] = [
        SearchField::Title,
        SearchField::Notes,
        SearchField::DoctorName,
        SearchField::MedicationName,
        SearchField::LabName,
    ];
}

/// One health event owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthEvent {
    pub id: EventId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl HealthEvent {
    /// Discriminator string; `"other"` for types this crate does not model.
    pub fn type_name(&self) -> &'static str {
        self.kind.event_type().map_or("other", EventType::as_str)
    }

    pub fn text_field(&self, field: SearchField) -> Option<&str> {
        match (field, &self.kind) {
            (SearchField::Title, _) => Some(self.title.as_str()),
            (SearchField::Notes, _) => self.notes.as_deref(),
            (SearchField::DoctorName, EventKind::DoctorVisit(visit)) => visit.doctor_name.as_deref(),
            (SearchField::MedicationName, EventKind::Medication(med)) => {
                med.medication_name.as_deref()
            }
            (SearchField::LabName, EventKind::LabResult(lab)) => lab.lab_name.as_deref(),
            _ => None,
        }
    }

    pub fn as_lab_result(&self) -> Option<&LabResult> {
        match &self.kind {
            EventKind::LabResult(lab) => Some(lab),
            _ => None,
        }
    }

    pub fn as_medication(&self) -> Option<&Medication> {
        match &self.kind {
            EventKind::Medication(med) => Some(med),
            _ => None,
        }
    }
}

/// Type-specific payload of a [`HealthEvent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    LabResult(LabResult),
    DoctorVisit(DoctorVisit),
    Medication(Medication),
    Intervention(Intervention),
    Metric(Metric),
    Vice(Vice),
    /// Stored type this crate does not recognize; only base fields are exposed.
    #[serde(other)]
    Other,
}

impl EventKind {
    pub fn event_type(&self) -> Option<EventType> {
        match self {
            EventKind::LabResult(_) => Some(EventType::LabResult),
            EventKind::DoctorVisit(_) => Some(EventType::DoctorVisit),
            EventKind::Medication(_) => Some(EventType::Medication),
            EventKind::Intervention(_) => Some(EventType::Intervention),
            EventKind::Metric(_) => Some(EventType::Metric),
            EventKind::Vice(_) => Some(EventType::Vice),
            EventKind::Other => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabResult {
    pub lab_name: Option<String>,
    pub ordering_doctor: Option<String>,
    /// `None` when the lab report was never parsed into measurements.
    pub biomarkers: Option<Vec<BiomarkerValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoctorVisit {
    pub doctor_name: Option<String>,
    pub specialty: Option<String>,
    pub facility: Option<String>,
    pub diagnosis: Option<Vec<String>>,
    pub follow_up: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Medication {
    pub medication_name: Option<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub prescriber: Option<String>,
    pub reason: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub is_active: bool,
    pub side_effects: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Intervention {
    pub intervention_name: Option<String>,
    pub category: Option<String>,
    pub protocol: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metric {
    pub metric_name: Option<String>,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vice {
    pub vice_category: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub context: Option<String>,
}
