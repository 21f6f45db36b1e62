//! Biomarker reference data and recorded values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical biomarker definition. Reference data, not user-owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiomarkerStandard {
    pub code: String,
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub aliases: Vec<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub category: String,
}

/// A single value attached to a lab result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerValue {
    pub name: String,
    pub value: f64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub unit: String,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub ref_min: Option<f64>,
    #[serde(default)]
    pub ref_max: Option<f64>,
}

impl BiomarkerValue {
    /// `"<min>-<max>"` when both bounds are recorded.
    pub fn reference_range(&self) -> Option<String> {
        match (self.ref_min, self.ref_max) {
            (Some(min), Some(max)) => Some(format!("{}-{}", min, max)),
            _ => None,
        }
    }
}

/// A [`BiomarkerValue`] lifted out of its lab result, with the record's date and lab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiomarkerMeasurement {
    pub date: NaiveDate,
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub flag: Option<String>,
    pub reference_range: Option<String>,
    pub lab_name: Option<String>,
}

impl BiomarkerMeasurement {
    pub fn from_value(value: &BiomarkerValue, date: NaiveDate, lab_name: Option<&str>) -> Self {
        Self {
            date,
            name: value.name.clone(),
            value: value.value,
            unit: value.unit.clone(),
            flag: value.flag.clone(),
            reference_range: value.reference_range(),
            lab_name: lab_name.map(str::to_string),
        }
    }
}
