use async_trait::async_trait;
use seatsniper_types::{AlertRecord, EventMatch, HistoricalPrice, Subscription};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("backend error: {0}")]
    Backend(String),
}

/// §6: the five durable collections the rest of the system reads and
/// writes through. A concrete implementation (Postgres, SQLite, ...) is
/// swapped in behind this trait; `memory::InMemoryStore` is the
/// reference/fallback implementation used in tests and when no database is
/// configured.
#[async_trait]
pub trait DurableStore: Send + Sync {
    async fn save_subscription(&self, subscription: Subscription) -> Result<(), StoreError>;
    async fn load_subscription(&self, user_id: &str) -> Result<Option<Subscription>, StoreError>;
    async fn load_all_subscriptions(&self) -> Result<Vec<Subscription>, StoreError>;

    async fn append_price_history(&self, event_id: &str, price: HistoricalPrice) -> Result<(), StoreError>;
    async fn load_price_history(&self, event_id: &str) -> Result<Vec<HistoricalPrice>, StoreError>;

    async fn append_alert(&self, record: AlertRecord) -> Result<(), StoreError>;
    async fn alert_history_for(&self, user_id: &str) -> Result<Vec<AlertRecord>, StoreError>;

    async fn save_event_group(&self, group: EventMatch) -> Result<(), StoreError>;
    async fn load_event_group(&self, group_id: &str) -> Result<Option<EventMatch>, StoreError>;

    async fn watchlist_for(&self, user_id: &str) -> Result<Vec<String>, StoreError>;
    async fn set_watchlist(&self, user_id: &str, event_ids: Vec<String>) -> Result<(), StoreError>;
}
