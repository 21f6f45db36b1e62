//! In-memory [`HealthStore`] backed by a JSON snapshot.
//!
//! Used by the CLI and by tests. Query semantics are the ones documented on
//! [`EventQuery`], applied after the owner filter.

use super::{EventQuery, HealthStore, StoreResult};
use crate::records::{BiomarkerStandard, HealthEvent, UserProfile};
use crate::types::{EventId, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Serialized form of a store: `{events, profiles, biomarker_standards}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSnapshot {
    pub events: Vec<HealthEvent>,
    pub profiles: Vec<UserProfile>,
    pub biomarker_standards: Vec<BiomarkerStandard>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    events: Vec<HealthEvent>,
    profiles: HashMap<UserId, UserProfile>,
    standards: Vec<BiomarkerStandard>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let mut store = Self {
            events: snapshot.events,
            profiles: HashMap::new(),
            standards: snapshot.biomarker_standards,
        };
        for profile in snapshot.profiles {
            match profile.user_id.clone() {
                Some(owner) => {
                    store.profiles.insert(owner, profile);
                }
                None => tracing::warn!("snapshot_profile_without_owner_skipped"),
            }
        }
        store
    }

    /// Load a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> crate::types::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let snapshot: StoreSnapshot = serde_json::from_str(&raw)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn with_event(mut self, event: HealthEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn with_profile(mut self, owner: UserId, mut profile: UserProfile) -> Self {
        profile.user_id = Some(owner.clone());
        self.profiles.insert(owner, profile);
        self
    }

    pub fn with_standard(mut self, standard: BiomarkerStandard) -> Self {
        self.standards.push(standard);
        self
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

#[async_trait]
impl HealthStore for InMemoryStore {
    async fn query_events(
        &self,
        owner: &UserId,
        query: &EventQuery,
    ) -> StoreResult<Vec<HealthEvent>> {
        let mut matched: Vec<&HealthEvent> = self
            .events
            .iter()
            .filter(|e| &e.user_id == owner && query.matches(e))
            .collect();
        matched.sort_by(|a, b| query.compare(a, b));
        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }
        Ok(matched.into_iter().cloned().collect())
    }

    async fn biomarker_standards(&self) -> StoreResult<Vec<BiomarkerStandard>> {
        Ok(self.standards.clone())
    }

    async fn get_event(&self, owner: &UserId, id: &EventId) -> StoreResult<Option<HealthEvent>> {
        Ok(self
            .events
            .iter()
            .find(|e| &e.id == id && &e.user_id == owner)
            .cloned())
    }

    async fn get_profile(&self, owner: &UserId) -> StoreResult<Option<UserProfile>> {
        Ok(self.profiles.get(owner).cloned())
    }
}
