use super::contract::{DurableStore, StoreError};
use std::sync::Arc;

/// §4.10 `C13`: a per-user capped list of tracked event ids. Writes go to
/// the durable store when available; reads fall back to an in-memory copy
/// if the store call fails, so a transient database outage degrades to
/// stale data instead of an error surfaced to the user.
pub const MAX_WATCHLIST_SIZE: usize = 50;

pub struct WatchlistService {
    store: Arc<dyn DurableStore>,
    fallback: std::sync::RwLock<std::collections::HashMap<String, Vec<String>>>,
}

impl WatchlistService {
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self { store, fallback: std::sync::RwLock::new(std::collections::HashMap::new()) }
    }

    pub async fn add(&self, user_id: &str, event_id: &str) -> Result<(), StoreError> {
        let mut current = self.get(user_id).await;
        if current.iter().any(|e| e == event_id) {
            return Ok(());
        }
        if current.len() >= MAX_WATCHLIST_SIZE {
            return Err(StoreError::Backend("watchlist is full".to_string()));
        }
        current.push(event_id.to_string());
        self.persist(user_id, current).await
    }

    pub async fn remove(&self, user_id: &str, event_id: &str) -> Result<(), StoreError> {
        let mut current = self.get(user_id).await;
        current.retain(|e| e != event_id);
        self.persist(user_id, current).await
    }

    pub async fn get(&self, user_id: &str) -> Vec<String> {
        match self.store.watchlist_for(user_id).await {
            Ok(list) => {
                self.fallback.write().unwrap().insert(user_id.to_string(), list.clone());
                list
            }
            Err(_) => self.fallback.read().unwrap().get(user_id).cloned().unwrap_or_default(),
        }
    }

    async fn persist(&self, user_id: &str, list: Vec<String>) -> Result<(), StoreError> {
        self.fallback.write().unwrap().insert(user_id.to_string(), list.clone());
        self.store.set_watchlist(user_id, list).await
    }
}
