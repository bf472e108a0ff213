use serde::{Deserialize, Serialize};

/// Per-component weights for the value-scoring engine. Must sum to `1.0`
/// within `1e-3` (§4.4, §8(iii)); an engine constructed with any other
/// vector is a construction error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub price: f64,
    pub section: f64,
    pub row: f64,
    pub historical: f64,
    pub resale: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            price: 0.35,
            section: 0.25,
            row: 0.15,
            historical: 0.15,
            resale: 0.10,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.price + self.section + self.row + self.historical + self.resale
    }

    pub fn validate(&self) -> Result<(), String> {
        if (self.sum() - 1.0).abs() > 1e-3 {
            return Err(format!(
                "scoring weights must sum to 1.0 (+/- 1e-3), got {}",
                self.sum()
            ));
        }
        Ok(())
    }
}

/// Thresholds for the boolean flags attached to a `ValueScoreResult` (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlagThresholds {
    /// Price within this fraction of the historical low counts as
    /// `isHistoricalLow` (default 5%).
    pub historical_low_tolerance: f64,
    /// Row ranks at or below this count as `isFrontRow` (default 3).
    pub front_row_max_rank: u32,
    /// Price at least this fraction below average counts as
    /// `isPriceOutlier` (default 25%).
    pub price_outlier_discount: f64,
}

impl Default for FlagThresholds {
    fn default() -> Self {
        Self {
            historical_low_tolerance: 0.05,
            front_row_max_rank: 3,
            price_outlier_discount: 0.25,
        }
    }
}

/// Decay factor applied to historical price points sorted newest-first
/// before averaging (§4.4d).
pub const HISTORICAL_DECAY: f64 = 0.9;

/// Tunables for the event matcher (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    pub max_time_delta_minutes: i64,
    pub min_name_similarity: u8,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_time_delta_minutes: 30,
            min_name_similarity: 85,
        }
    }
}

/// Top-level configuration for the `value-engine` crate, validated once at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueEngineConfig {
    pub weights: ScoringWeights,
    pub flags: FlagThresholds,
    pub matcher: MatcherConfig,
}

impl Default for ValueEngineConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            flags: FlagThresholds::default(),
            matcher: MatcherConfig::default(),
        }
    }
}

impl ValueEngineConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.weights.validate()?;
        if self.flags.historical_low_tolerance < 0.0 {
            return Err("historical_low_tolerance must be non-negative".to_string());
        }
        if self.flags.price_outlier_discount < 0.0 {
            return Err("price_outlier_discount must be non-negative".to_string());
        }
        if self.matcher.min_name_similarity > 100 {
            return Err("min_name_similarity must be a percentage 0-100".to_string());
        }
        Ok(())
    }
}

/// Reference price used when a caller supplies no average (§8 boundary: sub
/// scorers fall back to neutral 50 rather than erroring).
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Sentinel used when a section number cannot be extracted (§4.6).
pub const MISSING_SECTION_NUMBER: u32 = 999;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_validate() {
        assert!(ScoringWeights::default().validate().is_ok());
    }

    #[test]
    fn default_weights_sum_to_one() {
        assert!((ScoringWeights::default().sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn lopsided_weights_are_rejected() {
        let weights = ScoringWeights {
            price: 0.9,
            section: 0.25,
            row: 0.15,
            historical: 0.15,
            resale: 0.10,
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn default_config_is_valid() {
        assert!(ValueEngineConfig::default().validate().is_ok());
    }
}
