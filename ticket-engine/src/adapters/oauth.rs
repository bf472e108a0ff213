use super::errors::AdapterError;
use chrono::{DateTime, Utc};
use std::future::Future;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// §4.3/§9: OAuth tokens are refreshed at most once per expiry window even
/// under concurrent callers. A `tokio::sync::Mutex` guarding the cache slot
/// makes refresh single-flight — a second caller arriving mid-refresh waits
/// for the lock and then finds a fresh token already in place instead of
/// triggering its own request.
pub struct OAuthTokenCache {
    platform: String,
    refresh_skew: chrono::Duration,
    token: Mutex<Option<CachedToken>>,
}

impl OAuthTokenCache {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            refresh_skew: chrono::Duration::seconds(60),
            token: Mutex::new(None),
        }
    }

    /// Returns a currently-valid access token, refreshing via `refresh` if
    /// absent or within the pre-expiry skew window.
    pub async fn ensure_valid_token<F, Fut>(&self, refresh: F) -> Result<String, AdapterError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(String, DateTime<Utc>), AdapterError>>,
    {
        let mut slot = self.token.lock().await;
        let needs_refresh = match &*slot {
            Some(cached) => Utc::now() + self.refresh_skew >= cached.expires_at,
            None => true,
        };
        if needs_refresh {
            let (access_token, expires_at) = refresh().await?;
            *slot = Some(CachedToken { access_token: access_token.clone(), expires_at });
            return Ok(access_token);
        }
        Ok(slot.as_ref().unwrap().access_token.clone())
    }

    /// §9: a 401 from the upstream API means the cached token is stale
    /// regardless of its recorded expiry; clear it so the next call forces
    /// a refresh.
    pub async fn invalidate(&self) {
        let mut slot = self.token.lock().await;
        *slot = None;
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }
}
