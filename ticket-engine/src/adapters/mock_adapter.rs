use super::contract::{HealthStatus, MarketplaceAdapter};
use super::errors::AdapterError;
use async_trait::async_trait;
use seatsniper_types::{NormalizedEvent, NormalizedListing};
use std::sync::Mutex;

/// In-memory adapter double for scheduler/dispatcher tests (§6). Returns
/// canned fixtures and can be told to fail on demand, without a network
/// client or credentials.
pub struct MockAdapter {
    platform: String,
    events: Mutex<Vec<NormalizedEvent>>,
    listings: Mutex<Vec<NormalizedListing>>,
    fail_next: Mutex<Option<AdapterError>>,
}

impl MockAdapter {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            events: Mutex::new(Vec::new()),
            listings: Mutex::new(Vec::new()),
            fail_next: Mutex::new(None),
        }
    }

    pub fn with_events(self, events: Vec<NormalizedEvent>) -> Self {
        *self.events.lock().unwrap() = events;
        self
    }

    pub fn with_listings(self, listings: Vec<NormalizedListing>) -> Self {
        *self.listings.lock().unwrap() = listings;
        self
    }

    pub fn fail_next_call_with(&self, error: AdapterError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    fn take_failure(&self) -> Option<AdapterError> {
        self.fail_next.lock().unwrap().take()
    }
}

#[async_trait]
impl MarketplaceAdapter for MockAdapter {
    fn platform_name(&self) -> &str {
        &self.platform
    }

    async fn initialize(&self) -> Result<(), AdapterError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(())
    }

    async fn search_events(&self, _city: &str, _keyword: Option<&str>) -> Result<Vec<NormalizedEvent>, AdapterError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(self.events.lock().unwrap().clone())
    }

    async fn get_event_listings(&self, _event: &NormalizedEvent) -> Result<Vec<NormalizedListing>, AdapterError> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(self.listings.lock().unwrap().clone())
    }

    async fn health_status(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}
