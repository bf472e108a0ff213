use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;

/// §4.9 `C14`: the multi-step state a user walks through in chat to create
/// a subscription or run an ad-hoc search. Sessions expire after
/// `SESSION_TTL` of inactivity.
pub const SESSION_TTL: Duration = Duration::minutes(10);
const PRUNE_INTERVAL: std::time::Duration = std::time::Duration::from_secs(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Idle,
    AwaitingCity,
    AwaitingQuantity,
    AwaitingBudget,
    AwaitingScore,
    AwaitingSearchKeyword,
    AwaitingSearchCity,
}

#[derive(Debug, Clone)]
pub struct WizardSession {
    pub step: WizardStep,
    pub city: Option<String>,
    pub quantity: Option<u32>,
    pub budget: Option<rust_decimal::Decimal>,
    pub min_score: Option<u8>,
    pub search_keyword: Option<String>,
    last_touched: DateTime<Utc>,
}

impl WizardSession {
    fn new() -> Self {
        Self {
            step: WizardStep::Idle,
            city: None,
            quantity: None,
            budget: None,
            min_score: None,
            search_keyword: None,
            last_touched: Utc::now(),
        }
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.last_touched > SESSION_TTL
    }
}

/// Concurrent session store keyed by user id, with a background pruner task
/// (§4.9) removing sessions idle past the TTL every `PRUNE_INTERVAL`.
#[derive(Clone)]
pub struct WizardSessionStore {
    sessions: Arc<DashMap<String, WizardSession>>,
}

impl WizardSessionStore {
    pub fn new() -> Self {
        Self { sessions: Arc::new(DashMap::new()) }
    }

    pub fn get_or_create(&self, user_id: &str) -> WizardSession {
        let mut entry = self.sessions.entry(user_id.to_string()).or_insert_with(WizardSession::new);
        entry.last_touched = Utc::now();
        entry.clone()
    }

    pub fn update(&self, user_id: &str, f: impl FnOnce(&mut WizardSession)) {
        let mut entry = self.sessions.entry(user_id.to_string()).or_insert_with(WizardSession::new);
        f(&mut entry);
        entry.last_touched = Utc::now();
    }

    pub fn clear(&self, user_id: &str) {
        self.sessions.remove(user_id);
    }

    pub fn prune_expired(&self) -> usize {
        let now = Utc::now();
        let expired: Vec<String> = self
            .sessions
            .iter()
            .filter(|entry| entry.value().is_expired(now))
            .map(|entry| entry.key().clone())
            .collect();
        for key in &expired {
            self.sessions.remove(key);
        }
        expired.len()
    }

    /// Spawns the background pruner. Returns its `JoinHandle` so callers
    /// can abort it on shutdown.
    pub fn spawn_pruner(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(PRUNE_INTERVAL);
            loop {
                interval.tick().await;
                self.prune_expired();
            }
        })
    }
}

impl Default for WizardSessionStore {
    fn default() -> Self {
        Self::new()
    }
}
