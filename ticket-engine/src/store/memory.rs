use super::contract::{DurableStore, StoreError};
use async_trait::async_trait;
use seatsniper_types::{AlertRecord, EventMatch, HistoricalPrice, Subscription};
use std::collections::HashMap;
use std::sync::RwLock;

/// §6 reference implementation: everything lives in process memory. Used
/// in tests and as the fallback when no external database is configured
/// (§4.10's watchlist fallback generalizes to every collection here).
#[derive(Default)]
pub struct InMemoryStore {
    subscriptions: RwLock<HashMap<String, Subscription>>,
    price_history: RwLock<HashMap<String, Vec<HistoricalPrice>>>,
    alerts: RwLock<Vec<AlertRecord>>,
    event_groups: RwLock<HashMap<String, EventMatch>>,
    watchlists: RwLock<HashMap<String, Vec<String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DurableStore for InMemoryStore {
    async fn save_subscription(&self, subscription: Subscription) -> Result<(), StoreError> {
        self.subscriptions.write().unwrap().insert(subscription.user_id.clone(), subscription);
        Ok(())
    }

    async fn load_subscription(&self, user_id: &str) -> Result<Option<Subscription>, StoreError> {
        Ok(self.subscriptions.read().unwrap().get(user_id).cloned())
    }

    async fn load_all_subscriptions(&self) -> Result<Vec<Subscription>, StoreError> {
        Ok(self.subscriptions.read().unwrap().values().cloned().collect())
    }

    async fn append_price_history(&self, event_id: &str, price: HistoricalPrice) -> Result<(), StoreError> {
        self.price_history.write().unwrap().entry(event_id.to_string()).or_default().push(price);
        Ok(())
    }

    async fn load_price_history(&self, event_id: &str) -> Result<Vec<HistoricalPrice>, StoreError> {
        Ok(self.price_history.read().unwrap().get(event_id).cloned().unwrap_or_default())
    }

    async fn append_alert(&self, record: AlertRecord) -> Result<(), StoreError> {
        self.alerts.write().unwrap().push(record);
        Ok(())
    }

    async fn alert_history_for(&self, user_id: &str) -> Result<Vec<AlertRecord>, StoreError> {
        Ok(self.alerts.read().unwrap().iter().filter(|a| a.user_id == user_id).cloned().collect())
    }

    async fn save_event_group(&self, group: EventMatch) -> Result<(), StoreError> {
        self.event_groups.write().unwrap().insert(group.group_id.clone(), group);
        Ok(())
    }

    async fn load_event_group(&self, group_id: &str) -> Result<Option<EventMatch>, StoreError> {
        Ok(self.event_groups.read().unwrap().get(group_id).cloned())
    }

    async fn watchlist_for(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.watchlists.read().unwrap().get(user_id).cloned().unwrap_or_default())
    }

    async fn set_watchlist(&self, user_id: &str, event_ids: Vec<String>) -> Result<(), StoreError> {
        self.watchlists.write().unwrap().insert(user_id.to_string(), event_ids);
        Ok(())
    }
}
