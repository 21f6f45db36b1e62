//! Biomarker name resolution.
//!
//! A free-text name from the model ("hba1c", "bad cholesterol", "Vitamin D") is
//! expanded into a match-term set using the standards catalog, then recorded
//! measurement names are compared against that set.
//!
//! The default [`SubstringMatcher`] uses bidirectional substring containment. Short
//! codes can over-match ("t3" is inside "free t3" and "t3 uptake"); callers go through
//! [`TermMatcher`] so a token or edit-distance matcher can replace it.

use crate::records::{BiomarkerMeasurement, BiomarkerStandard, HealthEvent};
use std::collections::BTreeSet;
use std::fmt;

/// Normalized query plus every synonym it resolved to.
///
/// Always contains the normalized query itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTerms {
    query: String,
    terms: BTreeSet<String>,
}

impl MatchTerms {
    /// Term set holding only `query`, which should already be normalized.
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let mut terms = BTreeSet::new();
        terms.insert(query.clone());
        Self { query, terms }
    }

    pub fn insert(&mut self, term: impl Into<String>) {
        self.terms.insert(term.into());
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn terms(&self) -> &BTreeSet<String> {
        &self.terms
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Strategy for synonym expansion and measurement matching.
pub trait TermMatcher: Send + Sync + fmt::Debug {
    /// Expand `raw` into a match-term set using `standards`.
    fn resolve(&self, raw: &str, standards: &[BiomarkerStandard]) -> MatchTerms;

    /// Whether a recorded measurement name belongs to `terms`.
    fn matches(&self, terms: &MatchTerms, recorded_name: &str) -> bool;
}

/// Trim and lowercase.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn overlaps(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

/// Bidirectional substring containment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubstringMatcher;

impl SubstringMatcher {
    fn candidate_terms(standard: &BiomarkerStandard) -> Vec<String> {
        std::iter::once(&standard.code)
            .chain(std::iter::once(&standard.name))
            .chain(standard.aliases.iter())
            .map(|t| normalize(t))
            .filter(|t| !t.is_empty())
            .collect()
    }
}

impl TermMatcher for SubstringMatcher {
    fn resolve(&self, raw: &str, standards: &[BiomarkerStandard]) -> MatchTerms {
        let mut resolved = MatchTerms::new(normalize(raw));

        for standard in standards {
            let candidates = Self::candidate_terms(standard);
            if candidates.iter().any(|c| overlaps(c, &resolved.query)) {
                resolved.terms.extend(candidates);
            }
        }

        resolved
    }

    fn matches(&self, terms: &MatchTerms, recorded_name: &str) -> bool {
        let recorded = normalize(recorded_name);
        terms.terms.iter().any(|term| overlaps(&recorded, term))
    }
}

/// Every measurement in `events` whose name matches `terms`, oldest record first.
///
/// Events that are not lab results, or carry no measurement list, contribute nothing.
pub fn extract_measurements(
    events: &[HealthEvent],
    terms: &MatchTerms,
    matcher: &dyn TermMatcher,
) -> Vec<BiomarkerMeasurement> {
    let mut measurements = Vec::new();
    for event in events {
        let Some(lab) = event.as_lab_result() else {
            continue;
        };
        let Some(values) = &lab.biomarkers else {
            continue;
        };
        measurements.extend(
            values
                .iter()
                .filter(|v| matcher.matches(terms, &v.name))
                .map(|v| BiomarkerMeasurement::from_value(v, event.date, lab.lab_name.as_deref())),
        );
    }

    measurements.sort_by_key(|m| m.date);
    measurements
}
