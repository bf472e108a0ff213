use crate::event::EventId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Append-only trail of dispatch and credential decisions, kept separately
/// from the alert ledger (§6) so operators can answer "why didn't this user
/// get an alert" without replaying scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchAuditLog {
    pub entry_id: Uuid,
    pub user_id: String,
    pub event_id: EventId,
    pub decision: DispatchDecision,
    pub context: DecisionContext,
    pub decided_by: String,
    pub timestamp: DateTime<Utc>,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DispatchDecision {
    Sent {
        channel: String,
        top_score: u8,
    },
    SuppressedCooldown {
        last_sent_at: DateTime<Utc>,
    },
    SuppressedBelowThreshold {
        top_score: u8,
        min_score: u8,
    },
    SuppressedNoQualifyingListing,
    SuppressedSubscriptionInactive,
    DeliveryFailed {
        channel: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionContext {
    pub trigger_event: String,
    pub threshold_breaches: Vec<ThresholdBreach>,
    pub urgency_level: UrgencyLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdBreach {
    pub threshold_name: String,
    pub threshold_value: f64,
    pub current_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrgencyLevel {
    Normal,
    High,
}

/// In-memory audit trail with a bounded ring, mirroring the cooldown
/// ledger's eviction shape (§4.7).
pub struct DispatchAuditLogger {
    entries: Vec<DispatchAuditLog>,
    max_entries: usize,
}

impl DispatchAuditLogger {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    pub fn log(&mut self, mut entry: DispatchAuditLog) {
        if entry.entry_id == Uuid::nil() {
            entry.entry_id = Uuid::new_v4();
        }
        self.entries.push(entry);
        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }

    pub fn for_user(&self, user_id: &str) -> Vec<&DispatchAuditLog> {
        self.entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .collect()
    }

    pub fn for_event(&self, event_id: &EventId) -> Vec<&DispatchAuditLog> {
        self.entries
            .iter()
            .filter(|e| &e.event_id == event_id)
            .collect()
    }

    pub fn summary(&self) -> DispatchAuditSummary {
        let mut sent = 0usize;
        let mut suppressed = 0usize;
        let mut failed = 0usize;
        for entry in &self.entries {
            match &entry.decision {
                DispatchDecision::Sent { .. } => sent += 1,
                DispatchDecision::DeliveryFailed { .. } => failed += 1,
                _ => suppressed += 1,
            }
        }
        DispatchAuditSummary {
            total: self.entries.len(),
            sent,
            suppressed,
            failed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchAuditSummary {
    pub total: usize,
    pub sent: usize,
    pub suppressed: usize,
    pub failed: usize,
}
