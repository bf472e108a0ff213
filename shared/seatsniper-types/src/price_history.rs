use crate::event::EventId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An append-only per-event-per-section time series point (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPrice {
    pub event_id: EventId,
    pub section: String,
    pub average_price: Decimal,
    pub lowest_price: Decimal,
    pub highest_price: Decimal,
    pub listing_count: usize,
    pub recorded_at: DateTime<Utc>,
}
