pub mod engine;
pub mod orchestrator;
pub mod tracked_events;

pub use engine::PollingEngine;
pub use orchestrator::{run_alert_prune_cycle, ActiveCycles, CycleKind, SchedulerConfig};
pub use tracked_events::TrackedEventRegistry;
