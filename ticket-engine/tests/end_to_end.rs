use chrono::Utc;
use rust_decimal_macros::dec;
use seatsniper_types::{
    Category, Channel, DeliveryType, EventId, ListingId, NormalizedEvent, NormalizedListing, Platform, Recommendation,
    ScoreBreakdown, ScoreFlags, ScoredListing, Subscription, Venue, ValueScoreResult,
};
use std::sync::Arc;
use ticket_engine::dispatch::{CooldownRing, Dispatcher, SubscriptionRegistry};
use ticket_engine::notifiers::mock::MockNotifier;
use ticket_engine::store::InMemoryStore;

fn event() -> NormalizedEvent {
    NormalizedEvent {
        id: EventId::new(Platform::Ticketmaster, "e1"),
        name: "Blazers vs Lakers".into(),
        venue: Venue { id: "v".into(), name: "Moda Center".into(), city: "Portland".into(), state: None },
        date_time: Utc::now() + chrono::Duration::days(3),
        category: Category::Sports,
        canonical_url: "https://x".into(),
        image_url: None,
        seat_map_url: Some("https://x/seatmap.png".into()),
        price_range: None,
    }
}

fn scored(price: rust_decimal::Decimal, score: u8) -> ScoredListing {
    ScoredListing {
        listing: NormalizedListing {
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
            deep_link: "https://x/listing".into(),
            captured_at: Utc::now(),
        },
        score: ValueScoreResult {
            total_score: score,
            breakdown: ScoreBreakdown { price: 0.0, section: 0.0, row: 0.0, historical: 0.0, resale: 0.0 },
            recommendation: Recommendation::from_total_score(score),
            reasoning: "exceptional value".into(),
            flags: ScoreFlags::default(),
        },
    }
}

/// Exercises the subscription -> cooldown -> dispatch -> notifier pipeline
/// end to end with the in-process reference doubles, then verifies the
/// cooldown window suppresses an immediate repeat.
#[tokio::test]
async fn alert_is_sent_once_then_suppressed_by_cooldown() {
    let subscriptions = Arc::new(SubscriptionRegistry::new());
    subscriptions.upsert(Subscription::new("u1", Channel::Telegram, vec!["Portland".into()], 50, 1).unwrap());

    let cooldown = Arc::new(CooldownRing::new());
    let store = Arc::new(InMemoryStore::new());
    let mut dispatcher = Dispatcher::new(subscriptions.clone(), cooldown.clone(), store);
    let notifier = Arc::new(MockNotifier::new(Channel::Telegram));
    dispatcher.register_notifier(notifier.clone());

    let event = event();
    let listings = vec![scored(dec!(75), 92)];

    dispatcher.dispatch_event(&event, &listings, 5).await;
    assert_eq!(notifier.sent_count(), 1);

    // Second discovery cycle for the same event within the cooldown window.
    dispatcher.dispatch_event(&event, &listings, 5).await;
    assert_eq!(notifier.sent_count(), 1, "cooldown should suppress the repeat send");
}
