//! Health record store boundary.
//!
//! The store itself lives outside this crate; [`HealthStore`] is the contract a
//! backend implements. Every event and profile method takes the owner explicitly,
//! and handlers only ever pass the caller identity they were given.
//!
//! Filters travel as a structured [`EventQuery`] so a backend can bind each part
//! as a parameter of its native query API instead of splicing text into a filter.

mod memory;

pub use memory::{InMemoryStore, StoreSnapshot};

use crate::records::{BiomarkerStandard, EventType, HealthEvent, SearchField, UserProfile};
use crate::types::{EventId, StoreError, UserId};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Result type for store calls.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Read-only access to a user-scoped health record store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthStore: Send + Sync {
    /// Events owned by `owner` that satisfy `query`, ordered and limited as requested.
    async fn query_events(&self, owner: &UserId, query: &EventQuery)
        -> StoreResult<Vec<HealthEvent>>;

    /// The full biomarker-standards reference catalog.
    async fn biomarker_standards(&self) -> StoreResult<Vec<BiomarkerStandard>>;

    /// A single event matching both `id` and `owner`.
    async fn get_event(&self, owner: &UserId, id: &EventId) -> StoreResult<Option<HealthEvent>>;

    /// The profile of `owner`, if one was ever created.
    async fn get_profile(&self, owner: &UserId) -> StoreResult<Option<UserProfile>>;
}

/// Case-insensitive substring match over several text columns, OR-combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch {
    pub needle: String,
    pub fields: Vec<SearchField>,
}

impl TextMatch {
    pub fn matches(&self, event: &HealthEvent) -> bool {
        let needle = self.needle.to_lowercase();
        self.fields.iter().any(|field| {
            event
                .text_field(*field)
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    DateDescending,
    DateAscending,
}

/// Structured event filter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventQuery {
    pub text: Option<TextMatch>,
    /// `Some(empty)` matches nothing.
    pub event_types: Option<Vec<EventType>>,
    /// Inclusive.
    pub start_date: Option<NaiveDate>,
    /// Inclusive.
    pub end_date: Option<NaiveDate>,
    /// Only lab results whose measurement list is present.
    pub require_biomarkers: bool,
    /// Only medications flagged active. Other event types are unaffected.
    pub active_medications_only: bool,
    pub order: SortOrder,
    pub limit: Option<usize>,
}

impl EventQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn containing(mut self, needle: impl Into<String>, fields: &[SearchField]) -> Self {
        self.text = Some(TextMatch {
            needle: needle.into(),
            fields: fields.to_vec(),
        });
        self
    }

    pub fn of_types(mut self, types: impl IntoIterator<Item = EventType>) -> Self {
        self.event_types = Some(types.into_iter().collect());
        self
    }

    pub fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn with_biomarkers(mut self) -> Self {
        self.require_biomarkers = true;
        self
    }

    pub fn active_medications_only(mut self, active_only: bool) -> Self {
        self.active_medications_only = active_only;
        self
    }

    pub fn ordered(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `event` passes every filter. Ownership is not checked here.
    pub fn matches(&self, event: &HealthEvent) -> bool {
        if let Some(types) = &self.event_types {
            match event.kind.event_type() {
                Some(t) if types.contains(&t) => {}
                _ => return false,
            }
        }
        if self.start_date.is_some_and(|start| event.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| event.date > end) {
            return false;
        }
        if self.require_biomarkers
            && !event
                .as_lab_result()
                .is_some_and(|lab| lab.biomarkers.is_some())
        {
            return false;
        }
        if self.active_medications_only
            && event.as_medication().is_some_and(|med| !med.is_active)
        {
            return false;
        }
        if let Some(text) = &self.text {
            if !text.matches(event) {
                return false;
            }
        }
        true
    }

    /// Ordering for matched events; ties fall back to the id so output is stable.
    pub fn compare(&self, a: &HealthEvent, b: &HealthEvent) -> Ordering {
        let by_date = match self.order {
            SortOrder::DateDescending => b.date.cmp(&a.date),
            SortOrder::DateAscending => a.date.cmp(&b.date),
        };
        by_date.then_with(|| a.id.cmp(&b.id))
    }
}
