#![allow(clippy::too_many_arguments)]
#![allow(clippy::redundant_field_names)]

//! Everything with I/O, concurrency, and process lifetime: marketplace
//! adapters and their resilience envelope (C1-C3), the durable store
//! contract (C7), subscriptions and dispatch (C8-C9), the polling
//! scheduler (C10), notifiers (C11), the seat-map resolver (C12), the
//! watchlist (C13), the wizard session store (C14), and the configuration
//! registry (C15). The deterministic scoring/matching/comparison logic
//! lives in `value-engine`; this crate calls into it but never reimplements it.

pub mod adapters;
pub mod api;
pub mod dispatch;
pub mod monitoring;
pub mod notifiers;
pub mod scheduler;
pub mod seatmap;
pub mod store;
pub mod utils;

pub use adapters::{
    AdapterError, AdapterRegistry, GuardedAdapter, HealthStatus, MarketplaceAdapter, RateLimiter, ResilienceEnvelope,
};
pub use dispatch::{CooldownRing, Dispatcher, SubscriptionRegistry};
pub use scheduler::{ActiveCycles, CycleKind, PollingEngine, SchedulerConfig, TrackedEventRegistry};
pub use store::{DurableStore, InMemoryStore, StoreError, WatchlistService, WizardSessionStore, WizardStep};
pub use utils::ConfigRegistry;
