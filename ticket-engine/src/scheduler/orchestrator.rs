use super::tracked_events::TrackedEventRegistry;
use seatsniper_types::{PollPriority, TrackedEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// §4.8 tunables. Defaults match the documented behavior exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub max_events_per_cycle: usize,
    pub batch_size: usize,
    pub alert_score_threshold: u8,
    pub top_n: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_events_per_cycle: 50,
            batch_size: 5,
            alert_score_threshold: 70,
            top_n: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleKind {
    Discovery,
    HighPriorityListings,
    MediumPriorityListings,
    LowPriorityListings,
    AlertRingPrune,
}

/// §4.8: a single-flight guard per cycle kind. If a cycle is still running
/// when its next tick fires, the tick is skipped rather than queued — two
/// overlapping discovery cycles would double-count API quota.
#[derive(Default)]
pub struct ActiveCycles {
    discovery: AtomicBool,
    high: AtomicBool,
    medium: AtomicBool,
    low: AtomicBool,
    alert_prune: AtomicBool,
}

pub struct CycleGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl ActiveCycles {
    fn flag(&self, kind: CycleKind) -> &AtomicBool {
        match kind {
            CycleKind::Discovery => &self.discovery,
            CycleKind::HighPriorityListings => &self.high,
            CycleKind::MediumPriorityListings => &self.medium,
            CycleKind::LowPriorityListings => &self.low,
            CycleKind::AlertRingPrune => &self.alert_prune,
        }
    }

    /// Attempts to enter `kind`'s critical section. Returns `None` if
    /// another run of the same cycle is already in progress.
    pub fn try_enter(&self, kind: CycleKind) -> Option<CycleGuard<'_>> {
        let flag = self.flag(kind);
        if flag
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            Some(CycleGuard { flag })
        } else {
            None
        }
    }
}

/// Splits up to `max` tracked events of the given priority into batches of
/// `batch_size` (§4.8).
pub fn select_batches(
    registry: &TrackedEventRegistry,
    priority: PollPriority,
    config: &SchedulerConfig,
) -> Vec<Vec<TrackedEvent>> {
    let mut events = registry.events_with_priority(priority);
    events.truncate(config.max_events_per_cycle);
    events
        .chunks(config.batch_size)
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Runs one listings-polling cycle for `priority`, invoking `process_batch`
/// for each non-empty batch of tracked events (§4.8 skip-empty rule: a
/// cycle with no eligible events does nothing, not even acquire the guard's
/// side effects beyond the no-op).
pub async fn run_listings_cycle<F, Fut>(
    active_cycles: &ActiveCycles,
    kind: CycleKind,
    registry: &TrackedEventRegistry,
    priority: PollPriority,
    config: &SchedulerConfig,
    mut process_batch: F,
) where
    F: FnMut(Vec<TrackedEvent>) -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    let Some(_guard) = active_cycles.try_enter(kind) else {
        debug!(?kind, "cycle already running, skipping tick");
        return;
    };

    let batches = select_batches(registry, priority, config);
    if batches.is_empty() {
        debug!(?kind, "no eligible events, skipping cycle");
        return;
    }

    info!(?kind, batch_count = batches.len(), "running listings cycle");
    for batch in batches {
        process_batch(batch).await;
    }
}

/// §4.8 alert-ring-prune cycle: reclaims cooldown-ring memory on a timer
/// rather than relying on the ring's own write-triggered eviction. Single-
/// flight like every other cycle.
pub fn run_alert_prune_cycle(active_cycles: &ActiveCycles, cooldown: &crate::dispatch::CooldownRing) {
    let Some(_guard) = active_cycles.try_enter(CycleKind::AlertRingPrune) else {
        debug!(kind = ?CycleKind::AlertRingPrune, "cycle already running, skipping tick");
        return;
    };
    let removed = cooldown.prune_expired();
    if removed > 0 {
        info!(removed, "pruned expired cooldown ring entries");
    }
}
