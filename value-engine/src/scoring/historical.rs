use crate::config::HISTORICAL_DECAY;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use seatsniper_types::HistoricalPrice;

/// Recency-weighted average of `averagePrice` across `history`, applying a
/// `0.9^n` decay to points sorted newest-first (§4.4d).
pub fn weighted_average(history: &[HistoricalPrice]) -> f64 {
    let mut sorted: Vec<&HistoricalPrice> = history.iter().collect();
    sorted.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for (n, point) in sorted.iter().enumerate() {
        let weight = HISTORICAL_DECAY.powi(n as i32);
        weighted_sum += weight * point.average_price.to_f64().unwrap_or(0.0);
        weight_total += weight;
    }

    if weight_total == 0.0 {
        0.0
    } else {
        weighted_sum / weight_total
    }
}

/// §4.4(d). Absent history returns the neutral 50 (§8 boundary). At or below
/// the historical low scores 100; at/above the weighted average decays
/// toward 0; between the two, linear interpolation toward 50.
pub fn historical_score(price: Decimal, history: &[HistoricalPrice]) -> f64 {
    if history.is_empty() {
        return 50.0;
    }

    let avg = weighted_average(history);
    let lowest = history
        .iter()
        .map(|h| h.lowest_price.to_f64().unwrap_or(0.0))
        .fold(f64::MAX, f64::min);
    let price_f = price.to_f64().unwrap_or(0.0);

    if price_f <= lowest {
        return 100.0;
    }
    if price_f >= avg {
        return (50.0 - (price_f - avg) / avg * 100.0).round().max(0.0);
    }
    if (avg - lowest).abs() < f64::EPSILON {
        return 50.0;
    }
    (50.0 + (avg - price_f) / (avg - lowest) * 50.0).round()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use seatsniper_types::{EventId, Platform};

    fn point(avg: Decimal, low: Decimal, days_ago: i64) -> HistoricalPrice {
        HistoricalPrice {
            event_id: EventId::new(Platform::Ticketmaster, "evt-1"),
            section: "100".into(),
            average_price: avg,
            lowest_price: low,
            highest_price: avg,
            listing_count: 10,
            recorded_at: Utc::now() - chrono::Duration::days(days_ago),
        }
    }

    #[test]
    fn empty_history_returns_neutral_score() {
        assert_eq!(historical_score(dec!(80), &[]), 50.0);
    }

    #[test]
    fn price_at_or_below_low_scores_hundred() {
        let history = vec![point(dec!(100), dec!(80), 0)];
        assert_eq!(historical_score(dec!(80), &history), 100.0);
        assert_eq!(historical_score(dec!(70), &history), 100.0);
    }

    #[test]
    fn price_above_average_decays_below_fifty() {
        let history = vec![point(dec!(100), dec!(80), 0)];
        let score = historical_score(dec!(150), &history);
        assert!(score < 50.0);
    }

    #[test]
    fn price_between_low_and_average_interpolates() {
        let history = vec![point(dec!(100), dec!(80), 0)];
        let score = historical_score(dec!(90), &history);
        assert!(score > 50.0 && score < 100.0);
    }

    #[test]
    fn newest_points_dominate_the_weighted_average() {
        let history = vec![point(dec!(200), dec!(150), 30), point(dec!(100), dec!(80), 0)];
        let avg = weighted_average(&history);
        assert!(avg < 150.0);
    }
}
