use crate::event::{EventId, Platform};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// First matching substring wins against the marketplace's raw delivery
/// label (§4.3); default is `Electronic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryType {
    Electronic,
    Instant,
    Physical,
    WillCall,
}

impl Default for DeliveryType {
    fn default() -> Self {
        DeliveryType::Electronic
    }
}

impl DeliveryType {
    /// §4.3 normalization rule: "first matching substring wins against
    /// {instant/mobile -> instant; electronic/digital -> electronic;
    /// willcall -> willcall; ups/fedex/mail/ship -> physical}; default =
    /// electronic."
    pub fn from_raw_label(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if lower.contains("instant") || lower.contains("mobile") {
            DeliveryType::Instant
        } else if lower.contains("electronic") || lower.contains("digital") {
            DeliveryType::Electronic
        } else if lower.contains("willcall") {
            DeliveryType::WillCall
        } else if lower.contains("ups")
            || lower.contains("fedex")
            || lower.contains("mail")
            || lower.contains("ship")
        {
            DeliveryType::Physical
        } else {
            DeliveryType::Electronic
        }
    }
}

/// Stable cross-adapter identity for a listing: `(platform,
/// platformListingId)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId {
    pub platform: Platform,
    pub platform_listing_id: String,
}

impl ListingId {
    pub fn new(platform: Platform, platform_listing_id: impl Into<String>) -> Self {
        Self {
            platform,
            platform_listing_id: platform_listing_id.into(),
        }
    }
}

/// A single for-sale offer on a marketplace. Immutable once emitted by an
/// adapter (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedListing {
    pub id: ListingId,
    pub event_id: EventId,
    pub section: String,
    pub row: String,
    pub seat_numbers: Option<Vec<String>>,
    pub quantity: u32,
    pub price_per_ticket: Decimal,
    pub total_price: Decimal,
    pub fees: Decimal,
    pub delivery_type: DeliveryType,
    pub seller_rating: Option<f64>,
    pub deep_link: String,
    pub captured_at: DateTime<Utc>,
}

impl NormalizedListing {
    /// §3 invariants: `quantity >= 1`, `pricePerTicket > 0`, `fees >= 0`.
    pub fn validate(&self) -> Result<(), crate::error::ModelError> {
        if self.quantity < 1 {
            return Err(crate::error::ModelError::InvalidListingQuantity(
                self.quantity,
            ));
        }
        if self.price_per_ticket <= Decimal::ZERO {
            return Err(crate::error::ModelError::InvalidPrice(
                self.price_per_ticket.to_string(),
            ));
        }
        if self.fees < Decimal::ZERO {
            return Err(crate::error::ModelError::InvalidFees(self.fees.to_string()));
        }
        Ok(())
    }
}
