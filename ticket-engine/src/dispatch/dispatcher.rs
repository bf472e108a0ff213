use super::cooldown::CooldownRing;
use super::subscriptions::SubscriptionRegistry;
use crate::notifiers::{AlertPayload, DeliveryStatus, Notifier};
use crate::store::DurableStore;
use seatsniper_types::{
    AlertRecord, Channel, DecisionContext, DispatchAuditLog, DispatchAuditLogger, DispatchDecision, NormalizedEvent,
    ScoredListing, Subscription, UrgencyLevel,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, warn};

/// §4.7 `C9`: turns a scored-listings batch for one event into per-subscriber
/// alert decisions, logs every decision (sent or suppressed), and routes
/// deliveries to the right notifier.
pub struct Dispatcher {
    subscriptions: Arc<SubscriptionRegistry>,
    cooldown: Arc<CooldownRing>,
    store: Arc<dyn DurableStore>,
    notifiers: HashMap<Channel, Arc<dyn Notifier>>,
    audit: std::sync::Mutex<DispatchAuditLogger>,
}

impl Dispatcher {
    pub fn new(subscriptions: Arc<SubscriptionRegistry>, cooldown: Arc<CooldownRing>, store: Arc<dyn DurableStore>) -> Self {
        Self {
            subscriptions,
            cooldown,
            store,
            notifiers: HashMap::new(),
            audit: std::sync::Mutex::new(DispatchAuditLogger::new(10_000)),
        }
    }

    pub fn register_notifier(&mut self, notifier: Arc<dyn Notifier>) {
        self.notifiers.insert(notifier.channel(), notifier);
    }

    /// Runs the full pipeline for one event against its scored listings,
    /// sorted best-first by caller. `top_n` caps how many listings are
    /// summarized in the payload.
    pub async fn dispatch_event(&self, event: &NormalizedEvent, scored: &[ScoredListing], top_n: usize) {
        if scored.is_empty() {
            return;
        }
        let city = &event.venue.city;
        let candidates = self
            .subscriptions
            .candidates_for(city, event.category, &event.name);

        for subscription in candidates {
            self.dispatch_to_subscriber(event, scored, top_n, &subscription).await;
        }
    }

    async fn dispatch_to_subscriber(
        &self,
        event: &NormalizedEvent,
        scored: &[ScoredListing],
        top_n: usize,
        subscription: &Subscription,
    ) {
        // §4.7 step 3: a listing only counts toward this subscriber if it
        // meets their budget and quantity bar. Everything downstream — the
        // score check, the payload's top pick, the summary — is scoped to
        // this qualifying subset, never the event's unfiltered top listing.
        let qualifying: Vec<&ScoredListing> = scored
            .iter()
            .filter(|s| {
                s.listing.quantity >= subscription.min_quantity && subscription.within_budget(s.listing.price_per_ticket)
            })
            .collect();

        let decision = self.decide(&qualifying, subscription).await;
        self.log_decision(event, subscription, &decision);

        if let DispatchDecision::Sent { .. } = &decision {
            let top = qualifying[0];
            self.send_alert(event, &qualifying, top, top_n, subscription).await;
        }
    }

    async fn decide(&self, qualifying: &[&ScoredListing], subscription: &Subscription) -> DispatchDecision {
        if !subscription.can_receive_alerts() {
            return DispatchDecision::SuppressedSubscriptionInactive;
        }
        if qualifying.is_empty() {
            return DispatchDecision::SuppressedNoQualifyingListing;
        }
        let top = qualifying[0];

        if self.cooldown.is_on_cooldown(&top.listing.event_id, &subscription.user_id) {
            let last_sent_at = self
                .cooldown
                .last_sent_at(&top.listing.event_id, &subscription.user_id)
                .unwrap_or_else(chrono::Utc::now);
            return DispatchDecision::SuppressedCooldown { last_sent_at };
        }
        // Fast path misses fall back to the durable ledger so a process
        // restart can't reset the cooldown clock (§4.7 steps 2/6, §9). A
        // store error is logged and treated as "not on cooldown" — the
        // in-memory ring is still consulted on every call either way.
        match self.store.alert_history_for(&subscription.user_id).await {
            Ok(history) => {
                if let Some(last) = history
                    .iter()
                    .filter(|r| r.event_id == top.listing.event_id)
                    .map(|r| r.sent_at)
                    .max()
                {
                    if chrono::Utc::now() - last < super::cooldown::ALERT_COOLDOWN {
                        return DispatchDecision::SuppressedCooldown { last_sent_at: last };
                    }
                }
            }
            Err(err) => {
                warn!(user_id = %subscription.user_id, %err, "durable alert history unavailable, relying on in-memory cooldown only");
            }
        }

        if top.score.total_score < subscription.min_score {
            return DispatchDecision::SuppressedBelowThreshold {
                top_score: top.score.total_score,
                min_score: subscription.min_score,
            };
        }
        DispatchDecision::Sent {
            channel: format!("{:?}", subscription.channel),
            top_score: top.score.total_score,
        }
    }

    async fn send_alert(
        &self,
        event: &NormalizedEvent,
        qualifying: &[&ScoredListing],
        top: &ScoredListing,
        top_n: usize,
        subscription: &Subscription,
    ) {
        let Some(notifier) = self.notifiers.get(&subscription.channel) else {
            warn!(channel = ?subscription.channel, "no notifier registered for channel");
            return;
        };

        let summary = qualifying
            .iter()
            .take(top_n)
            .map(|s| format!("{} ${} (score {})", s.listing.section, s.listing.price_per_ticket, s.score.total_score))
            .collect::<Vec<_>>()
            .join("; ");

        let payload = AlertPayload {
            user_id: subscription.user_id.clone(),
            event_name: event.name.clone(),
            venue_name: event.venue.name.clone(),
            top_score: top.score.total_score,
            top_listing_summary: summary,
            seat_map_url: event.seat_map_url.clone(),
            deep_link: top.listing.deep_link.clone(),
        };

        let status = notifier.send(&payload).await;
        match status {
            DeliveryStatus::Delivered => {
                let record = AlertRecord {
                    event_id: top.listing.event_id.clone(),
                    user_id: subscription.user_id.clone(),
                    sent_at: chrono::Utc::now(),
                    top_score: top.score.total_score,
                    channel: subscription.channel,
                    success: true,
                };
                self.cooldown.record(record.clone());
                if let Err(err) = self.store.append_alert(record).await {
                    warn!(user_id = %subscription.user_id, %err, "failed to persist alert to durable ledger");
                }
            }
            DeliveryStatus::HardFailure { ref reason } => {
                error!(user_id = %subscription.user_id, channel = ?subscription.channel, %reason, "hard delivery failure, deactivating subscription");
                self.subscriptions.deactivate(&subscription.user_id);
            }
            DeliveryStatus::TransientFailure { .. } => {}
        }
    }

    fn log_decision(&self, event: &NormalizedEvent, subscription: &Subscription, decision: &DispatchDecision) {
        let log = DispatchAuditLog {
            entry_id: uuid::Uuid::nil(),
            user_id: subscription.user_id.clone(),
            event_id: event.id.clone(),
            decision: decision.clone(),
            context: DecisionContext {
                trigger_event: "listings_cycle".to_string(),
                threshold_breaches: vec![],
                urgency_level: UrgencyLevel::Normal,
            },
            decided_by: "dispatcher".to_string(),
            timestamp: chrono::Utc::now(),
            metadata: HashMap::new(),
        };
        self.audit.lock().unwrap().log(log);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifiers::mock::MockNotifier;
    use crate::store::InMemoryStore;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use seatsniper_types::{
        Category, DeliveryType, EventId, ListingId, Platform, Recommendation, ScoreBreakdown, ScoreFlags, Venue,
        ValueScoreResult,
    };

    fn event() -> NormalizedEvent {
        NormalizedEvent {
            id: EventId::new(Platform::Ticketmaster, "e1"),
            name: "Blazers vs Lakers".into(),
            venue: Venue { id: "v".into(), name: "Moda Center".into(), city: "Portland".into(), state: None },
            date_time: Utc::now() + chrono::Duration::days(5),
            category: Category::Sports,
            canonical_url: "https://x".into(),
            image_url: None,
            seat_map_url: None,
            price_range: None,
        }
    }

    fn scored_listing(price: rust_decimal::Decimal, score: u8) -> ScoredListing {
        ScoredListing {
            listing: seatsniper_types::NormalizedListing {
                id: ListingId::new(Platform::Ticketmaster, "l1"),
                event_id: EventId::new(Platform::Ticketmaster, "e1"),
                section: "Floor".into(),
                row: "A".into(),
                seat_numbers: None,
                quantity: 2,
                price_per_ticket: price,
                total_price: price * dec!(2),
                fees: dec!(0),
                delivery_type: DeliveryType::Electronic,
                seller_rating: None,
                deep_link: "https://x".into(),
                captured_at: Utc::now(),
            },
            score: ValueScoreResult {
                total_score: score,
                breakdown: ScoreBreakdown { price: 0.0, section: 0.0, row: 0.0, historical: 0.0, resale: 0.0 },
                recommendation: Recommendation::from_total_score(score),
                reasoning: "test".into(),
                flags: ScoreFlags::default(),
            },
        }
    }

    #[tokio::test]
    async fn sends_to_an_eligible_subscriber_and_records_cooldown() {
        let subs = Arc::new(SubscriptionRegistry::new());
        subs.upsert(Subscription::new("u1", Channel::Telegram, vec!["Portland".into()], 50, 1).unwrap());
        let cooldown = Arc::new(CooldownRing::new());
        let store = Arc::new(InMemoryStore::new());
        let mut dispatcher = Dispatcher::new(subs.clone(), cooldown.clone(), store.clone());
        let notifier = Arc::new(MockNotifier::new(Channel::Telegram));
        dispatcher.register_notifier(notifier.clone());

        let scored = vec![scored_listing(dec!(80), 90)];
        dispatcher.dispatch_event(&event(), &scored, 5).await;

        assert_eq!(notifier.sent_count(), 1);
        assert!(cooldown.is_on_cooldown(&scored[0].listing.event_id, "u1"));
        assert_eq!(store.alert_history_for("u1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn below_threshold_subscriber_is_suppressed() {
        let subs = Arc::new(SubscriptionRegistry::new());
        subs.upsert(Subscription::new("u1", Channel::Telegram, vec!["Portland".into()], 95, 1).unwrap());
        let cooldown = Arc::new(CooldownRing::new());
        let store = Arc::new(InMemoryStore::new());
        let mut dispatcher = Dispatcher::new(subs, cooldown, store);
        let notifier = Arc::new(MockNotifier::new(Channel::Telegram));
        dispatcher.register_notifier(notifier.clone());

        let scored = vec![scored_listing(dec!(80), 60)];
        dispatcher.dispatch_event(&event(), &scored, 5).await;
        assert_eq!(notifier.sent_count(), 0);
    }

    #[tokio::test]
    async fn hard_failure_deactivates_subscription() {
        let subs = Arc::new(SubscriptionRegistry::new());
        subs.upsert(Subscription::new("u1", Channel::Telegram, vec!["Portland".into()], 50, 1).unwrap());
        let cooldown = Arc::new(CooldownRing::new());
        let store = Arc::new(InMemoryStore::new());
        let mut dispatcher = Dispatcher::new(subs.clone(), cooldown, store);
        let notifier = Arc::new(MockNotifier::new(Channel::Telegram).fail_with("bot kicked from chat"));
        dispatcher.register_notifier(notifier);

        let scored = vec![scored_listing(dec!(80), 90)];
        dispatcher.dispatch_event(&event(), &scored, 5).await;

        assert!(!subs.get("u1").unwrap().active);
    }

    #[tokio::test]
    async fn subscriber_with_a_budget_cap_only_sees_qualifying_listings() {
        let subs = Arc::new(SubscriptionRegistry::new());
        let mut sub = Subscription::new("u1", Channel::Telegram, vec!["Portland".into()], 50, 1).unwrap();
        sub.max_price_per_ticket = dec!(100);
        subs.upsert(sub);
        let cooldown = Arc::new(CooldownRing::new());
        let store = Arc::new(InMemoryStore::new());
        let mut dispatcher = Dispatcher::new(subs, cooldown, store);
        let notifier = Arc::new(MockNotifier::new(Channel::Telegram));
        dispatcher.register_notifier(notifier.clone());

        // Best-scored listing is over budget; only the cheaper one qualifies.
        let scored = vec![scored_listing(dec!(150), 95), scored_listing(dec!(80), 70)];
        dispatcher.dispatch_event(&event(), &scored, 5).await;

        assert_eq!(notifier.sent_count(), 1);
        let payload = notifier.last_payload().unwrap();
        assert!(payload.top_listing_summary.contains("80"));
        assert!(!payload.top_listing_summary.contains("150"));
        assert_eq!(payload.top_score, 70);
    }

    #[tokio::test]
    async fn subscriber_is_skipped_entirely_when_nothing_qualifies() {
        let subs = Arc::new(SubscriptionRegistry::new());
        let mut sub = Subscription::new("u1", Channel::Telegram, vec!["Portland".into()], 50, 1).unwrap();
        sub.max_price_per_ticket = dec!(50);
        subs.upsert(sub);
        let cooldown = Arc::new(CooldownRing::new());
        let store = Arc::new(InMemoryStore::new());
        let mut dispatcher = Dispatcher::new(subs, cooldown, store);
        let notifier = Arc::new(MockNotifier::new(Channel::Telegram));
        dispatcher.register_notifier(notifier.clone());

        let scored = vec![scored_listing(dec!(150), 95)];
        dispatcher.dispatch_event(&event(), &scored, 5).await;

        assert_eq!(notifier.sent_count(), 0);
    }
}
