use crate::event::NormalizedEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How urgently an event needs re-polling, derived from `daysUntilEvent`
/// (§4.8). `Past` events are never polled and are pruned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollPriority {
    High,
    Medium,
    Low,
    Past,
}

impl PollPriority {
    pub fn from_days_until(days_until: i64) -> Self {
        if days_until < 0 {
            PollPriority::Past
        } else if days_until <= 7 {
            PollPriority::High
        } else if days_until <= 30 {
            PollPriority::Medium
        } else {
            PollPriority::Low
        }
    }

    pub fn poll_interval(self) -> Option<chrono::Duration> {
        match self {
            PollPriority::High => Some(chrono::Duration::minutes(2)),
            PollPriority::Medium => Some(chrono::Duration::minutes(10)),
            PollPriority::Low => Some(chrono::Duration::minutes(30)),
            PollPriority::Past => None,
        }
    }
}

/// Wraps a `NormalizedEvent` with scheduler-owned polling bookkeeping (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedEvent {
    pub event: NormalizedEvent,
    pub last_polled: Option<DateTime<Utc>>,
    pub last_listing_count: usize,
}

impl TrackedEvent {
    pub fn new(event: NormalizedEvent) -> Self {
        Self {
            event,
            last_polled: None,
            last_listing_count: 0,
        }
    }

    pub fn priority(&self, now: DateTime<Utc>) -> PollPriority {
        PollPriority::from_days_until(self.event.days_until(now))
    }

    pub fn record_poll(&mut self, now: DateTime<Utc>, listing_count: usize) {
        self.last_polled = Some(now);
        self.last_listing_count = listing_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_boundaries() {
        assert_eq!(PollPriority::from_days_until(-1), PollPriority::Past);
        assert_eq!(PollPriority::from_days_until(0), PollPriority::High);
        assert_eq!(PollPriority::from_days_until(7), PollPriority::High);
        assert_eq!(PollPriority::from_days_until(8), PollPriority::Medium);
        assert_eq!(PollPriority::from_days_until(30), PollPriority::Medium);
        assert_eq!(PollPriority::from_days_until(31), PollPriority::Low);
    }

    #[test]
    fn past_priority_has_no_poll_interval() {
        assert!(PollPriority::Past.poll_interval().is_none());
    }

    #[test]
    fn tier_intervals_match_spec() {
        assert_eq!(
            PollPriority::High.poll_interval(),
            Some(chrono::Duration::minutes(2))
        );
        assert_eq!(
            PollPriority::Medium.poll_interval(),
            Some(chrono::Duration::minutes(10))
        );
        assert_eq!(
            PollPriority::Low.poll_interval(),
            Some(chrono::Duration::minutes(30))
        );
    }
}
