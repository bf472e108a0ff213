use crate::event::EventId;
use crate::subscription::Channel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Append-only alert ledger entry, used for cross-restart cooldown lookups
/// (§3, §4.7).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub event_id: EventId,
    pub user_id: String,
    pub sent_at: DateTime<Utc>,
    pub top_score: u8,
    pub channel: Channel,
    pub success: bool,
}

impl AlertRecord {
    pub fn key(&self) -> (EventId, String) {
        (self.event_id.clone(), self.user_id.clone())
    }
}
