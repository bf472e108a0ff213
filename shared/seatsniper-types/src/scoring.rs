use crate::listing::NormalizedListing;
use serde::{Deserialize, Serialize};

/// Canonical seating-quality bucket, ordered worst-to-best by ordinal value
/// (§3): `PREMIUM(1) < UPPER_PREMIUM(2) < MID_TIER(3) < UPPER_LEVEL(4) <
/// OBSTRUCTED(5)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SectionTier {
    Premium = 1,
    UpperPremium = 2,
    MidTier = 3,
    UpperLevel = 4,
    Obstructed = 5,
}

impl SectionTier {
    /// §4.4(b): table lookup from tier to section-quality sub-score.
    pub fn quality_score(self) -> f64 {
        match self {
            SectionTier::Premium => 100.0,
            SectionTier::UpperPremium => 80.0,
            SectionTier::MidTier => 60.0,
            SectionTier::UpperLevel => 40.0,
            SectionTier::Obstructed => 20.0,
        }
    }

    /// §4.4(e): table used by the resale-potential sub-score.
    pub fn resale_section_score(self) -> f64 {
        match self {
            SectionTier::Premium => 100.0,
            SectionTier::UpperPremium => 85.0,
            SectionTier::MidTier => 70.0,
            SectionTier::UpperLevel => 50.0,
            SectionTier::Obstructed => 30.0,
        }
    }

    pub fn is_premium(self) -> bool {
        matches!(self, SectionTier::Premium | SectionTier::UpperPremium)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Excellent,
    Good,
    Fair,
    BelowAverage,
    Poor,
}

impl Recommendation {
    /// §4.4 thresholds: `>=85 excellent; >=70 good; >=55 fair; >=40
    /// below_average; else poor`.
    pub fn from_total_score(total: u8) -> Self {
        if total >= 85 {
            Recommendation::Excellent
        } else if total >= 70 {
            Recommendation::Good
        } else if total >= 55 {
            Recommendation::Fair
        } else if total >= 40 {
            Recommendation::BelowAverage
        } else {
            Recommendation::Poor
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub price: f64,
    pub section: f64,
    pub row: f64,
    pub historical: f64,
    pub resale: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreFlags {
    pub is_historical_low: bool,
    pub is_premium_section: bool,
    pub is_front_row: bool,
    pub is_price_outlier: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueScoreResult {
    pub total_score: u8,
    pub breakdown: ScoreBreakdown,
    pub recommendation: Recommendation,
    pub reasoning: String,
    pub flags: ScoreFlags,
}

/// A listing paired with its computed value score (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredListing {
    pub listing: NormalizedListing,
    pub score: ValueScoreResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_tier_ordering() {
        assert!(SectionTier::Premium < SectionTier::UpperPremium);
        assert!(SectionTier::UpperPremium < SectionTier::MidTier);
        assert!(SectionTier::MidTier < SectionTier::UpperLevel);
        assert!(SectionTier::UpperLevel < SectionTier::Obstructed);
    }

    #[test]
    fn premium_flag_covers_top_two_tiers_only() {
        assert!(SectionTier::Premium.is_premium());
        assert!(SectionTier::UpperPremium.is_premium());
        assert!(!SectionTier::MidTier.is_premium());
        assert!(!SectionTier::UpperLevel.is_premium());
        assert!(!SectionTier::Obstructed.is_premium());
    }

    #[test]
    fn recommendation_thresholds() {
        assert_eq!(Recommendation::from_total_score(100), Recommendation::Excellent);
        assert_eq!(Recommendation::from_total_score(85), Recommendation::Excellent);
        assert_eq!(Recommendation::from_total_score(84), Recommendation::Good);
        assert_eq!(Recommendation::from_total_score(70), Recommendation::Good);
        assert_eq!(Recommendation::from_total_score(69), Recommendation::Fair);
        assert_eq!(Recommendation::from_total_score(55), Recommendation::Fair);
        assert_eq!(Recommendation::from_total_score(54), Recommendation::BelowAverage);
        assert_eq!(Recommendation::from_total_score(40), Recommendation::BelowAverage);
        assert_eq!(Recommendation::from_total_score(39), Recommendation::Poor);
        assert_eq!(Recommendation::from_total_score(1), Recommendation::Poor);
    }
}
