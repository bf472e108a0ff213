use lazy_static::lazy_static;
use prometheus::{opts, register_histogram_vec, register_int_counter_vec, register_int_gauge_vec, HistogramVec, IntCounterVec, IntGaugeVec};

lazy_static! {
    /// §10.5: adapter calls by platform and outcome class (`success`,
    /// `failure`, `circuit_open`, `bulkhead_full`).
    pub static ref ADAPTER_CALLS: IntCounterVec = register_int_counter_vec!(
        opts!("seatsniper_adapter_calls_total", "Adapter calls by platform and outcome"),
        &["platform", "outcome"]
    )
    .unwrap();

    /// Current circuit breaker state per platform, as 0=closed 1=half_open 2=open.
    pub static ref CIRCUIT_STATE: IntGaugeVec = register_int_gauge_vec!(
        opts!("seatsniper_circuit_breaker_state", "Circuit breaker state per platform"),
        &["platform"]
    )
    .unwrap();

    pub static ref CYCLE_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "seatsniper_cycle_duration_seconds",
        "Scheduler cycle duration by cycle kind",
        &["cycle"]
    )
    .unwrap();

    /// Alerts by outcome (`sent`, `suppressed_cooldown`, `suppressed_filter`, `failed`).
    pub static ref ALERTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        opts!("seatsniper_alerts_total", "Dispatch decisions by outcome"),
        &["outcome"]
    )
    .unwrap();

    pub static ref TRACKED_EVENTS: IntGaugeVec = register_int_gauge_vec!(
        opts!("seatsniper_tracked_events", "Number of events currently tracked by the scheduler"),
        &["priority"]
    )
    .unwrap();
}

pub fn circuit_state_value(state: crate::adapters::circuit_breaker::CircuitBreakerState) -> i64 {
    use crate::adapters::circuit_breaker::CircuitBreakerState::*;
    match state {
        Closed => 0,
        HalfOpen => 1,
        Open => 2,
    }
}
