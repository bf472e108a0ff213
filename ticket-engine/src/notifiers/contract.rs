use async_trait::async_trait;
use seatsniper_types::Channel;
use serde::{Deserialize, Serialize};

/// §6 payload handed to a notifier: everything needed to render an alert
/// message without the notifier reaching back into the data model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertPayload {
    pub user_id: String,
    pub event_name: String,
    pub venue_name: String,
    pub top_score: u8,
    pub top_listing_summary: String,
    pub seat_map_url: Option<String>,
    pub deep_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Delivered,
    /// A failure class that implies the recipient is permanently
    /// unreachable on this channel (§4.7: blocked, forbidden, chat not
    /// found, user deactivated, bot kicked) — the dispatcher auto-deactivates
    /// the subscription rather than retrying.
    HardFailure { reason: String },
    /// A transient failure (network error, rate limit) — safe to retry on
    /// the next cycle.
    TransientFailure { reason: String },
}

#[async_trait]
pub trait Notifier: Send + Sync {
    fn channel(&self) -> Channel;
    async fn send(&self, payload: &AlertPayload) -> DeliveryStatus;
}

/// §4.7: substrings that mark a delivery failure as unrecoverable for the
/// recipient, independent of which channel reported it.
const HARD_FAILURE_MARKERS: &[&str] = &["blocked", "forbidden", "chat not found", "user deactivated", "bot kicked"];

pub fn classify_failure(reason: &str) -> DeliveryStatus {
    let lower = reason.to_lowercase();
    if HARD_FAILURE_MARKERS.iter().any(|marker| lower.contains(marker)) {
        DeliveryStatus::HardFailure { reason: reason.to_string() }
    } else {
        DeliveryStatus::TransientFailure { reason: reason.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_each_hard_failure_marker() {
        for marker in HARD_FAILURE_MARKERS {
            assert!(matches!(classify_failure(marker), DeliveryStatus::HardFailure { .. }));
        }
    }

    #[test]
    fn unknown_reason_is_transient() {
        assert!(matches!(classify_failure("connection reset"), DeliveryStatus::TransientFailure { .. }));
    }
}
