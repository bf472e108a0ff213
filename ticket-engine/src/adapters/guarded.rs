use super::contract::{HealthStatus, MarketplaceAdapter};
use super::errors::AdapterError;
use super::rate_limiter::RateLimiter;
use super::resilience::ResilienceEnvelope;
use seatsniper_types::{NormalizedEvent, NormalizedListing};
use std::sync::Arc;

/// §3 ownership note: "adapter objects own their HTTP client, rate limiter,
/// and resilience envelope". Concrete adapters only implement
/// `MarketplaceAdapter`'s I/O; this wrapper is where the rate limiter and
/// resilience envelope actually sit in the call path, keyed off the
/// adapter's own platform name.
pub struct GuardedAdapter {
    inner: Arc<dyn MarketplaceAdapter>,
    rate_limiter: RateLimiter,
    resilience: ResilienceEnvelope,
}

impl GuardedAdapter {
    pub fn new(inner: Arc<dyn MarketplaceAdapter>, rate_limiter: RateLimiter) -> Self {
        let resilience = ResilienceEnvelope::new(inner.platform_name());
        Self { inner, rate_limiter, resilience }
    }

    pub fn platform_name(&self) -> &str {
        self.inner.platform_name()
    }

    pub async fn initialize(&self) -> Result<(), AdapterError> {
        self.inner.initialize().await
    }

    /// Every outbound call waits on the token bucket before entering the
    /// resilience envelope (§4.1, §5): `acquire` is the suspension point
    /// that paces calls to whatever the adapter's quota allows.
    pub async fn search_events(&self, city: &str, keyword: Option<&str>) -> Result<Vec<NormalizedEvent>, AdapterError> {
        self.rate_limiter.acquire().await;
        self.resilience.run(|| self.inner.search_events(city, keyword)).await
    }

    pub async fn get_event_listings(&self, event: &NormalizedEvent) -> Result<Vec<NormalizedListing>, AdapterError> {
        self.rate_limiter.acquire().await;
        self.resilience.run(|| self.inner.get_event_listings(event)).await
    }

    pub async fn health_status(&self) -> HealthStatus {
        self.inner.health_status().await
    }
}
