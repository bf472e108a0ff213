use crate::config::ValueEngineConfig;
use crate::error::EngineError;
use crate::scoring::historical::historical_score;
use crate::scoring::price::price_score;
use crate::scoring::resale::resale_score;
use crate::scoring::row::row_score;
use crate::scoring::section::resolve_section_tier;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use seatsniper_types::{
    HistoricalPrice, NormalizedListing, Recommendation, ScoreBreakdown, ScoreFlags, SectionTier,
    ValueScoreResult,
};
use std::collections::HashMap;

/// §4.4 input. `section_tiers` is the caller-supplied venue override map;
/// callers without a known venue layout pass an empty map and fall back to
/// the numeric/keyword/range resolution in `resolve_section_tier`.
#[derive(Debug, Clone)]
pub struct ValueScoreInput {
    pub listing: NormalizedListing,
    pub average_price: Decimal,
    pub section_tiers: HashMap<String, SectionTier>,
    pub row_rank: i64,
    pub total_rows_in_section: i64,
    pub historical_price_data: Vec<HistoricalPrice>,
    /// 0-100. No real popularity source exists yet; callers pass a fixed
    /// default until one is wired up.
    pub event_popularity: u8,
    pub days_until_event: i64,
}

/// The deterministic, stateless five-factor scorer (C4). Holds only
/// configuration — no adapter, store, or network access.
#[derive(Debug, Clone)]
pub struct ValueScoringEngine {
    config: ValueEngineConfig,
}

impl ValueScoringEngine {
    pub fn new(config: ValueEngineConfig) -> Result<Self, EngineError> {
        config
            .validate()
            .map_err(|_| EngineError::InvalidWeights(config.weights.sum()))?;
        Ok(Self { config })
    }

    pub fn with_default_config() -> Self {
        Self::new(ValueEngineConfig::default()).expect("default config is always valid")
    }

    pub fn score(&self, input: &ValueScoreInput) -> ValueScoreResult {
        let tier = resolve_section_tier(Some(input.listing.section.as_str()), &input.section_tiers);

        let price = input.listing.price_per_ticket;
        let price_sub = price_score(price, input.average_price);
        let section_sub = tier.quality_score();
        let row_sub = row_score(input.row_rank, input.total_rows_in_section);
        let historical_sub = historical_score(price, &input.historical_price_data);
        let resale_sub = resale_score(input.event_popularity, input.days_until_event, tier);

        let weights = self.config.weights;
        let weighted_total = price_sub * weights.price
            + section_sub * weights.section
            + row_sub * weights.row
            + historical_sub * weights.historical
            + resale_sub * weights.resale;
        let total_score = weighted_total.round().clamp(1.0, 100.0) as u8;

        let flags = self.compute_flags(input, tier, price_sub);
        let breakdown = ScoreBreakdown {
            price: price_sub,
            section: section_sub,
            row: row_sub,
            historical: historical_sub,
            resale: resale_sub,
        };
        let recommendation = Recommendation::from_total_score(total_score);
        let reasoning = build_reasoning(&flags, price_sub, recommendation);

        ValueScoreResult {
            total_score,
            breakdown,
            recommendation,
            reasoning,
            flags,
        }
    }

    fn compute_flags(&self, input: &ValueScoreInput, tier: SectionTier, price_sub: f64) -> ScoreFlags {
        let thresholds = self.config.flags;
        let price_f = input.listing.price_per_ticket.to_f64().unwrap_or(0.0);
        let average_f = input.average_price.to_f64().unwrap_or(0.0);

        let is_historical_low = input
            .historical_price_data
            .iter()
            .map(|h| h.lowest_price.to_f64().unwrap_or(f64::MAX))
            .fold(f64::MAX, f64::min);
        let is_historical_low = is_historical_low.is_finite()
            && is_historical_low > 0.0
            && price_f <= is_historical_low * (1.0 + thresholds.historical_low_tolerance);

        let is_premium_section = tier.is_premium();
        let is_front_row = input.row_rank >= 1 && input.row_rank as u32 <= thresholds.front_row_max_rank;
        let is_price_outlier = average_f > 0.0
            && price_f <= average_f * (1.0 - thresholds.price_outlier_discount)
            && price_sub > 0.0;

        ScoreFlags {
            is_historical_low,
            is_premium_section,
            is_front_row,
            is_price_outlier,
        }
    }
}

fn build_reasoning(flags: &ScoreFlags, price_sub: f64, recommendation: Recommendation) -> String {
    let mut clauses = Vec::new();
    if flags.is_price_outlier {
        clauses.push("Significantly below average price".to_string());
    } else if price_sub > 60.0 {
        clauses.push("Below average price".to_string());
    }
    if flags.is_premium_section {
        clauses.push("Premium seating location".to_string());
    }
    if flags.is_front_row {
        clauses.push("Front row position".to_string());
    }
    if flags.is_historical_low {
        clauses.push("Near historical low price".to_string());
    }

    if clauses.is_empty() {
        match recommendation {
            Recommendation::Excellent => "Excellent overall value".to_string(),
            Recommendation::Good => "Good overall value".to_string(),
            Recommendation::Fair => "Fair value for this listing".to_string(),
            Recommendation::BelowAverage => "Below-average value for this listing".to_string(),
            Recommendation::Poor => "Poor value for this listing".to_string(),
        }
    } else {
        clauses.join(". ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use seatsniper_types::{DeliveryType, EventId, ListingId, NormalizedListing, Platform};

    fn listing(section: &str, price: Decimal) -> NormalizedListing {
        NormalizedListing {
            id: ListingId::new(Platform::Ticketmaster, "lst-1"),
            event_id: EventId::new(Platform::Ticketmaster, "evt-1"),
            section: section.to_string(),
            row: "A".to_string(),
            seat_numbers: None,
            quantity: 2,
            price_per_ticket: price,
            total_price: price * dec!(2),
            fees: dec!(0),
            delivery_type: DeliveryType::Electronic,
            seller_rating: None,
            deep_link: "https://x".to_string(),
            captured_at: Utc::now(),
        }
    }

    fn history_point(avg: Decimal, low: Decimal) -> HistoricalPrice {
        HistoricalPrice {
            event_id: EventId::new(Platform::Ticketmaster, "evt-1"),
            section: "FLOOR".into(),
            average_price: avg,
            lowest_price: low,
            highest_price: avg,
            listing_count: 5,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn bargain_front_row_premium_ticket_scores_excellent() {
        // Scenario 1 (§8): $40 ticket, avg $100, PREMIUM, front row, history
        // low $80/avg $100, popularity 90, 14 days out.
        let engine = ValueScoringEngine::with_default_config();
        let input = ValueScoreInput {
            listing: listing("Floor A", dec!(40)),
            average_price: dec!(100),
            section_tiers: HashMap::new(),
            row_rank: 1,
            total_rows_in_section: 20,
            historical_price_data: vec![history_point(dec!(100), dec!(80))],
            event_popularity: 90,
            days_until_event: 14,
        };

        let result = engine.score(&input);
        assert!(result.total_score >= 85, "expected excellent, got {}", result.total_score);
        assert_eq!(result.recommendation, Recommendation::Excellent);
        assert!(result.flags.is_front_row);
        assert!(result.flags.is_premium_section);
        assert!(result.flags.is_price_outlier);
        assert!(result.flags.is_historical_low);
    }

    #[test]
    fn zero_average_price_never_flags_outlier() {
        let engine = ValueScoringEngine::with_default_config();
        let input = ValueScoreInput {
            listing: listing("100", dec!(40)),
            average_price: Decimal::ZERO,
            section_tiers: HashMap::new(),
            row_rank: 5,
            total_rows_in_section: 20,
            historical_price_data: vec![],
            event_popularity: 50,
            days_until_event: 10,
        };
        let result = engine.score(&input);
        assert_eq!(result.breakdown.price, 50.0);
        assert!(!result.flags.is_price_outlier);
    }

    #[test]
    fn total_score_is_always_in_range() {
        let engine = ValueScoringEngine::with_default_config();
        let input = ValueScoreInput {
            listing: listing("Obstructed 305", dec!(1000)),
            average_price: dec!(50),
            section_tiers: HashMap::new(),
            row_rank: 40,
            total_rows_in_section: 40,
            historical_price_data: vec![],
            event_popularity: 5,
            days_until_event: 300,
        };
        let result = engine.score(&input);
        assert!((1..=100).contains(&result.total_score));
    }

    #[test]
    fn engine_construction_rejects_invalid_weights() {
        use crate::config::ScoringWeights;
        let mut config = ValueEngineConfig::default();
        config.weights = ScoringWeights {
            price: 0.9,
            section: 0.25,
            row: 0.15,
            historical: 0.15,
            resale: 0.10,
        };
        assert!(ValueScoringEngine::new(config).is_err());
    }
}
