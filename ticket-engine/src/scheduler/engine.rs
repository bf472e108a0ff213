use super::orchestrator::{run_listings_cycle, ActiveCycles, CycleKind, SchedulerConfig};
use super::tracked_events::TrackedEventRegistry;
use crate::adapters::GuardedAdapter;
use crate::dispatch::Dispatcher;
use crate::store::DurableStore;
use futures::future::join_all;
use rust_decimal::Decimal;
use seatsniper_types::{HistoricalPrice, NormalizedListing, PollPriority, ScoredListing, TrackedEvent};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use value_engine::config::MatcherConfig;
use value_engine::{match_events, ValueScoreInput, ValueScoringEngine};

/// §4.4 boundary: no real popularity source exists yet, so every call site
/// passes this fixed default.
const EVENT_POPULARITY_DEFAULT: u8 = 50;

/// §4.8 `C10`: drives the discovery and per-tier listings cycles end to end —
/// the glue between the adapters, the scoring/matching engine, and the
/// dispatcher. `orchestrator` supplies the generic single-flight/batching
/// primitives; this is where their closures are filled in with real work.
pub struct PollingEngine {
    adapters: Vec<GuardedAdapter>,
    tracked_events: Arc<TrackedEventRegistry>,
    store: Arc<dyn DurableStore>,
    dispatcher: Arc<Dispatcher>,
    scoring: ValueScoringEngine,
    matcher_config: MatcherConfig,
    scheduler_config: SchedulerConfig,
}

impl PollingEngine {
    pub fn new(
        adapters: Vec<GuardedAdapter>,
        tracked_events: Arc<TrackedEventRegistry>,
        store: Arc<dyn DurableStore>,
        dispatcher: Arc<Dispatcher>,
        scoring: ValueScoringEngine,
        matcher_config: MatcherConfig,
        scheduler_config: SchedulerConfig,
    ) -> Self {
        Self {
            adapters,
            tracked_events,
            store,
            dispatcher,
            scoring,
            matcher_config,
            scheduler_config,
        }
    }

    fn adapter(&self, platform: &str) -> Option<&GuardedAdapter> {
        self.adapters.iter().find(|a| a.platform_name() == platform)
    }

    /// §4.8a: prune past events, fan out `searchEvents` per city across every
    /// registered adapter (a failing adapter only loses its own city/platform
    /// pair, never the cycle), register newly discovered events, then run the
    /// cross-platform matcher over everything discovered this cycle and
    /// persist the resulting groups.
    pub async fn run_discovery_cycle(&self, active_cycles: &ActiveCycles, cities: &[String]) {
        let Some(_guard) = active_cycles.try_enter(CycleKind::Discovery) else {
            return;
        };

        let pruned = self.tracked_events.prune_past_events();
        if pruned > 0 {
            info!(pruned, "dropped past events from the tracked set");
        }

        let searches = cities.iter().flat_map(|city| {
            self.adapters.iter().map(move |adapter| async move {
                match adapter.search_events(city, None).await {
                    Ok(events) => events,
                    Err(err) => {
                        warn!(platform = adapter.platform_name(), city, %err, "search_events failed, skipping");
                        Vec::new()
                    }
                }
            })
        });

        let discovered: Vec<_> = join_all(searches).await.into_iter().flatten().collect();
        if discovered.is_empty() {
            return;
        }

        for event in &discovered {
            self.tracked_events.upsert(event.clone());
        }

        let groups = match_events(&discovered, &self.matcher_config);
        info!(discovered = discovered.len(), groups = groups.len(), "discovery cycle complete");
        for group in groups {
            if let Err(err) = self.store.save_event_group(group).await {
                warn!(%err, "failed to persist event match group");
            }
        }
    }

    /// §4.8b: one listings-polling cycle for a single priority tier, batched
    /// and single-flight guarded by `orchestrator::run_listings_cycle`.
    pub async fn run_tier_listings_cycle(&self, active_cycles: &ActiveCycles, kind: CycleKind, priority: PollPriority) {
        run_listings_cycle(
            active_cycles,
            kind,
            &self.tracked_events,
            priority,
            &self.scheduler_config,
            |batch| self.process_listings_batch(batch),
        )
        .await;
    }

    async fn process_listings_batch(&self, batch: Vec<TrackedEvent>) {
        join_all(batch.into_iter().map(|tracked| self.process_tracked_event(tracked))).await;
    }

    /// Per event: fetch listings, score each one, record a price snapshot per
    /// section, cut to the alert-worthy top-N, and dispatch (§4.4, §4.7, §9).
    async fn process_tracked_event(&self, tracked: TrackedEvent) {
        let event = &tracked.event;
        let platform = event.id.platform.to_string();
        let Some(adapter) = self.adapter(&platform) else {
            warn!(platform = %platform, "no adapter registered for tracked event's platform");
            return;
        };

        let listings = match adapter.get_event_listings(event).await {
            Ok(listings) => listings,
            Err(err) => {
                warn!(platform = %platform, event_id = %event.id, %err, "get_event_listings failed, skipping event this cycle");
                return;
            }
        };
        self.tracked_events.record_poll(&event.id.to_string(), listings.len());
        if listings.is_empty() {
            return;
        }

        let history = match self.store.load_price_history(&event.id.to_string()).await {
            Ok(history) => history,
            Err(err) => {
                warn!(event_id = %event.id, %err, "price history unavailable, scoring without it");
                Vec::new()
            }
        };

        let average = average_price(&listings);
        let rows_per_section = rows_by_section(&listings);
        let days_until = event.days_until(chrono::Utc::now());

        let mut scored: Vec<ScoredListing> = listings
            .iter()
            .map(|listing| {
                let total_rows = *rows_per_section.get(&listing.section).unwrap_or(&0);
                let row_rank = value_engine::scoring::row::resolve_row_rank(&listing.row, total_rows);
                let historical_price_data: Vec<HistoricalPrice> =
                    history.iter().filter(|h| h.section == listing.section).cloned().collect();
                let input = ValueScoreInput {
                    listing: listing.clone(),
                    average_price: average,
                    section_tiers: HashMap::new(),
                    row_rank,
                    total_rows_in_section: total_rows,
                    historical_price_data,
                    event_popularity: EVENT_POPULARITY_DEFAULT,
                    days_until_event: days_until,
                };
                let score = self.scoring.score(&input);
                ScoredListing { listing: listing.clone(), score }
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_score.cmp(&a.score.total_score));

        for (section, price) in sections_summary(&listings) {
            let snapshot = HistoricalPrice {
                event_id: event.id.clone(),
                section,
                average_price: price.0,
                lowest_price: price.1,
                highest_price: price.2,
                listing_count: price.3,
                recorded_at: chrono::Utc::now(),
            };
            if let Err(err) = self.store.append_price_history(&event.id.to_string(), snapshot).await {
                warn!(event_id = %event.id, %err, "failed to persist price history snapshot");
            }
        }

        let alertable: Vec<ScoredListing> = scored
            .into_iter()
            .filter(|s| s.score.total_score >= self.scheduler_config.alert_score_threshold)
            .take(self.scheduler_config.top_n)
            .collect();
        if alertable.is_empty() {
            return;
        }

        self.dispatcher.dispatch_event(event, &alertable, self.scheduler_config.top_n).await;
    }
}

fn average_price(listings: &[NormalizedListing]) -> Decimal {
    if listings.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = listings.iter().map(|l| l.price_per_ticket).sum();
    sum / Decimal::from(listings.len())
}

fn rows_by_section(listings: &[NormalizedListing]) -> HashMap<String, i64> {
    let mut rows: HashMap<String, std::collections::HashSet<String>> = HashMap::new();
    for listing in listings {
        rows.entry(listing.section.clone()).or_default().insert(listing.row.clone());
    }
    rows.into_iter().map(|(section, tokens)| (section, tokens.len() as i64)).collect()
}

/// Per-section `(average, lowest, highest, count)` for a price-history
/// snapshot (§3).
fn sections_summary(listings: &[NormalizedListing]) -> HashMap<String, (Decimal, Decimal, Decimal, usize)> {
    let mut by_section: HashMap<String, Vec<Decimal>> = HashMap::new();
    for listing in listings {
        by_section.entry(listing.section.clone()).or_default().push(listing.price_per_ticket);
    }
    by_section
        .into_iter()
        .map(|(section, prices)| {
            let count = prices.len();
            let sum: Decimal = prices.iter().copied().sum();
            let lowest = prices.iter().copied().min().unwrap_or(Decimal::ZERO);
            let highest = prices.iter().copied().max().unwrap_or(Decimal::ZERO);
            (section, (sum / Decimal::from(count), lowest, highest, count))
        })
        .collect()
}
