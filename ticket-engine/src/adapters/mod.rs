pub mod bulkhead;
pub mod circuit_breaker;
pub mod contract;
pub mod errors;
pub mod guarded;
pub mod mock_adapter;
pub mod oauth;
pub mod rate_limiter;
pub mod registry;
pub mod resilience;
pub mod retry;

pub use contract::{HealthStatus, MarketplaceAdapter};
pub use errors::AdapterError;
pub use guarded::GuardedAdapter;
pub use rate_limiter::RateLimiter;
pub use registry::AdapterRegistry;
pub use resilience::ResilienceEnvelope;
