use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// §4.4(a). 50% below average scores 100, at average scores 50, 50%+ above
/// scores 0. Degenerate `averagePrice <= 0` returns the neutral 50 rather
/// than dividing by zero.
pub fn price_score(price: Decimal, average_price: Decimal) -> f64 {
    if average_price <= Decimal::ZERO {
        return 50.0;
    }
    let price_f = price.to_f64().unwrap_or(0.0);
    let avg_f = average_price.to_f64().unwrap_or(0.0);
    let diff_pct = (avg_f - price_f) / avg_f * 100.0;
    (50.0 + diff_pct).clamp(0.0, 100.0).round()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_average_returns_neutral_score() {
        assert_eq!(price_score(dec!(40), Decimal::ZERO), 50.0);
    }

    #[test]
    fn price_at_average_scores_fifty() {
        assert_eq!(price_score(dec!(100), dec!(100)), 50.0);
    }

    #[test]
    fn fifty_percent_below_average_scores_hundred() {
        assert_eq!(price_score(dec!(50), dec!(100)), 100.0);
    }

    #[test]
    fn fifty_percent_above_average_scores_zero() {
        assert_eq!(price_score(dec!(150), dec!(100)), 0.0);
    }

    #[test]
    fn far_above_average_clamps_at_zero() {
        assert_eq!(price_score(dec!(500), dec!(100)), 0.0);
    }

    #[test]
    fn symmetry_around_average_sums_to_hundred() {
        // §8(i): priceScore(price) + priceScore(2*avg - price) == 100 when unclamped.
        let avg = dec!(100);
        let price = dec!(70);
        let mirrored = dec!(2) * avg - price;
        assert_eq!(price_score(price, avg) + price_score(mirrored, avg), 100.0);
    }
}
