use chrono::{DateTime, Duration, Utc};
use seatsniper_types::{AlertRecord, EventId};
use std::sync::RwLock;

/// §4.7/(iv) cooldown window: a user is not re-alerted about the same event
/// within this period.
pub const ALERT_COOLDOWN: Duration = Duration::minutes(30);

/// §9: how long the ring keeps records around at all. Distinct from
/// `ALERT_COOLDOWN` — a record past cooldown but within retention still
/// answers audit-style "was this pair alerted recently" queries via
/// `last_sent_at`.
pub const RING_RETENTION: Duration = Duration::hours(24);

/// §4.7/§9: the hot path keeps a bounded in-memory ring of recent alerts so
/// most cooldown checks never touch the durable store; process restarts
/// fall back to the durable ledger (via `DurableStore::alert_history_for`)
/// so a restart can't defeat the cooldown. The two stores are kept separate
/// rather than collapsed into one (§9 open question) because the ring is
/// optimized for the hot "was this pair alerted in the last 30 minutes"
/// check while the ledger is optimized for audit queries by user or event.
#[derive(Default)]
pub struct CooldownRing {
    recent: RwLock<Vec<AlertRecord>>,
}

impl CooldownRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, record: AlertRecord) {
        let mut guard = self.recent.write().unwrap();
        guard.push(record);
        let cutoff = Utc::now() - RING_RETENTION;
        guard.retain(|r| r.sent_at >= cutoff);
    }

    /// True if `(event_id, user_id)` was alerted within the cooldown window,
    /// per the in-memory ring alone.
    pub fn is_on_cooldown(&self, event_id: &EventId, user_id: &str) -> bool {
        let cutoff = Utc::now() - ALERT_COOLDOWN;
        self.recent
            .read()
            .unwrap()
            .iter()
            .any(|r| &r.event_id == event_id && r.user_id == user_id && r.sent_at >= cutoff)
    }

    pub fn last_sent_at(&self, event_id: &EventId, user_id: &str) -> Option<DateTime<Utc>> {
        self.recent
            .read()
            .unwrap()
            .iter()
            .filter(|r| &r.event_id == event_id && r.user_id == user_id)
            .map(|r| r.sent_at)
            .max()
    }

    /// §4.8 alert-ring-prune cycle: drops entries past the cooldown window
    /// even on an otherwise-quiet ring (`record` only evicts on its own
    /// writes, so a ring with no new alerts would otherwise never shrink).
    /// Returns the number of entries dropped.
    pub fn prune_expired(&self) -> usize {
        let cutoff = Utc::now() - RING_RETENTION;
        let mut guard = self.recent.write().unwrap();
        let before = guard.len();
        guard.retain(|r| r.sent_at >= cutoff);
        before - guard.len()
    }
}
