use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The secondary-market platforms this engine talks to. Each corresponds to
/// one upstream adapter (§6); the adapters' concrete HTTP bodies are out of
/// scope here, only their identity matters to the core data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Ticketmaster,
    TicketmasterTopPicks,
    StubHub,
    SeatGeek,
    GoogleEvents,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Platform::Ticketmaster => "ticketmaster",
            Platform::TicketmasterTopPicks => "ticketmaster_top_picks",
            Platform::StubHub => "stubhub",
            Platform::SeatGeek => "seatgeek",
            Platform::GoogleEvents => "google_events",
        };
        write!(f, "{}", s)
    }
}

/// Event category, inferred by adapters from marketplace-specific
/// segment/genre metadata against a fixed keyword dictionary (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Concerts,
    Sports,
    Theater,
    Comedy,
    Festivals,
}

impl Default for Category {
    fn default() -> Self {
        Category::Concerts
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub city: String,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
    pub currency: String,
}

impl PriceRange {
    /// §4.3: record only if both bounds are strictly positive.
    pub fn from_bounds(lowest: Decimal, highest: Decimal) -> Option<Self> {
        if lowest > Decimal::ZERO && highest > Decimal::ZERO {
            Some(Self {
                min: lowest,
                max: highest,
                currency: "USD".to_string(),
            })
        } else {
            None
        }
    }
}

/// Stable cross-adapter identity for an event: `(platform, platformId)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId {
    pub platform: Platform,
    pub platform_id: String,
}

impl EventId {
    pub fn new(platform: Platform, platform_id: impl Into<String>) -> Self {
        Self {
            platform,
            platform_id: platform_id.into(),
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.platform, self.platform_id)
    }
}

/// An event as normalized from a single marketplace. Immutable once emitted
/// by an adapter (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub id: EventId,
    pub name: String,
    pub venue: Venue,
    pub date_time: DateTime<Utc>,
    pub category: Category,
    pub canonical_url: String,
    pub image_url: Option<String>,
    pub seat_map_url: Option<String>,
    pub price_range: Option<PriceRange>,
}

impl NormalizedEvent {
    pub fn days_until(&self, now: DateTime<Utc>) -> i64 {
        (self.date_time - now).num_days()
    }

    /// The §3 "past-event guard": events whose start time is more than 24h
    /// in the past are no longer tracked.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        now - self.date_time > chrono::Duration::hours(24)
    }
}
