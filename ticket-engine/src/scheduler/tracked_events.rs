use chrono::Utc;
use seatsniper_types::{NormalizedEvent, PollPriority, TrackedEvent};
use std::collections::HashMap;
use std::sync::RwLock;

/// §4.8/§3 `C10`: the live set of events being polled, keyed by event id
/// string. Past events are pruned rather than polled forever.
#[derive(Default)]
pub struct TrackedEventRegistry {
    events: RwLock<HashMap<String, TrackedEvent>>,
}

impl TrackedEventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, event: NormalizedEvent) {
        let key = event.id.to_string();
        let mut guard = self.events.write().unwrap();
        guard.entry(key).or_insert_with(|| TrackedEvent::new(event));
    }

    pub fn record_poll(&self, event_id: &str, listing_count: usize) {
        let mut guard = self.events.write().unwrap();
        if let Some(tracked) = guard.get_mut(event_id) {
            tracked.record_poll(Utc::now(), listing_count);
        }
    }

    /// §3: events more than 24h past their start time are dropped.
    pub fn prune_past_events(&self) -> usize {
        let now = Utc::now();
        let mut guard = self.events.write().unwrap();
        let before = guard.len();
        guard.retain(|_, tracked| !tracked.event.is_past(now));
        before - guard.len()
    }

    pub fn events_with_priority(&self, priority: PollPriority) -> Vec<TrackedEvent> {
        let now = Utc::now();
        self.events
            .read()
            .unwrap()
            .values()
            .filter(|t| t.priority(now) == priority)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
