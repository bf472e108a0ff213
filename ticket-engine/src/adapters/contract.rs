use super::errors::AdapterError;
use async_trait::async_trait;
use seatsniper_types::{NormalizedEvent, NormalizedListing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Down,
}

/// §4.3: the uniform surface every marketplace integration presents to the
/// scheduler. Implementations own their own authentication, rate limiting,
/// and HTTP client; callers only ever see normalized data or an
/// `AdapterError`.
#[async_trait]
pub trait MarketplaceAdapter: Send + Sync {
    fn platform_name(&self) -> &str;

    /// Performs any one-time setup (token acquisition, connectivity probe).
    /// Called once before the adapter is registered for polling.
    async fn initialize(&self) -> Result<(), AdapterError>;

    async fn search_events(&self, city: &str, keyword: Option<&str>) -> Result<Vec<NormalizedEvent>, AdapterError>;

    async fn get_event_listings(&self, event: &NormalizedEvent) -> Result<Vec<NormalizedListing>, AdapterError>;

    async fn health_status(&self) -> HealthStatus;
}
