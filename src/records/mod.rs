//! Record types read from the health store.
//!
//! Events, biomarker values and standards, and the user profile. All of them are
//! read-only from this crate's point of view.

mod biomarker;
mod event;
mod profile;

pub use biomarker::{BiomarkerMeasurement, BiomarkerStandard, BiomarkerValue};
pub use event::{
    DoctorVisit, EventKind, EventType, HealthEvent, Intervention, LabResult, Medication, Metric,
    SearchField, Vice,
};
pub use profile::UserProfile;

use serde::{Deserialize, Deserializer};

/// Stored columns are nullable; an explicit `null` reads as the field's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
