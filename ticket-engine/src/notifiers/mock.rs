use super::contract::{classify_failure, AlertPayload, DeliveryStatus, Notifier};
use async_trait::async_trait;
use seatsniper_types::Channel;
use std::sync::Mutex;

/// Test double covering all three channels (§6): configurable to succeed or
/// to fail with a given reason string, exercising the hard/transient
/// failure classifier without a real Telegram/SMS/WhatsApp client.
pub struct MockNotifier {
    channel: Channel,
    fail_with: Mutex<Option<String>>,
    sent: Mutex<Vec<AlertPayload>>,
}

impl MockNotifier {
    pub fn new(channel: Channel) -> Self {
        Self { channel, fail_with: Mutex::new(None), sent: Mutex::new(Vec::new()) }
    }

    pub fn fail_with(self, reason: impl Into<String>) -> Self {
        *self.fail_with.lock().unwrap() = Some(reason.into());
        self
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_payload(&self) -> Option<AlertPayload> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn send(&self, payload: &AlertPayload) -> DeliveryStatus {
        if let Some(reason) = self.fail_with.lock().unwrap().clone() {
            return classify_failure(&reason);
        }
        self.sent.lock().unwrap().push(payload.clone());
        DeliveryStatus::Delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> AlertPayload {
        AlertPayload {
            user_id: "u1".into(),
            event_name: "Show".into(),
            venue_name: "Arena".into(),
            top_score: 90,
            top_listing_summary: "Section 1, $80".into(),
            seat_map_url: None,
            deep_link: "https://x".into(),
        }
    }

    #[tokio::test]
    async fn succeeds_by_default() {
        let notifier = MockNotifier::new(Channel::Telegram);
        assert_eq!(notifier.send(&payload()).await, DeliveryStatus::Delivered);
        assert_eq!(notifier.sent_count(), 1);
    }

    #[tokio::test]
    async fn configured_failure_is_classified() {
        let notifier = MockNotifier::new(Channel::Sms).fail_with("user blocked the number");
        assert!(matches!(notifier.send(&payload()).await, DeliveryStatus::HardFailure { .. }));
    }
}
