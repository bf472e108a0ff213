use crate::error::ModelError;
use crate::event::{NormalizedEvent, Platform};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A cross-platform grouping of the same real-world event, produced by the
/// event matcher (§4.5). Invariant: members from at least two distinct
/// platforms; `confidence` is the minimum pairwise confidence among members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMatch {
    pub group_id: String,
    pub canonical_name: String,
    pub venue_name: String,
    pub event_date: DateTime<Utc>,
    pub events: HashMap<Platform, NormalizedEvent>,
    pub confidence: u8,
}

impl EventMatch {
    pub fn new(
        group_id: String,
        canonical_name: String,
        venue_name: String,
        event_date: DateTime<Utc>,
        events: HashMap<Platform, NormalizedEvent>,
        confidence: u8,
    ) -> Result<Self, ModelError> {
        if events.len() < 2 {
            return Err(ModelError::InsufficientPlatforms);
        }
        Ok(Self {
            group_id,
            canonical_name,
            venue_name,
            event_date,
            events,
            confidence,
        })
    }

    pub fn platform_count(&self) -> usize {
        self.events.len()
    }
}
