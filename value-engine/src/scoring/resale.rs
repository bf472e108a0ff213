use seatsniper_types::SectionTier;

fn popularity_score(popularity: u8) -> f64 {
    match popularity {
        90..=100 => 100.0,
        80..=89 => 90.0,
        60..=79 => 70.0,
        40..=59 => 50.0,
        20..=39 => 30.0,
        _ => 20.0,
    }
}

fn timing_score(days_until: i64) -> f64 {
    if days_until < 1 {
        20.0
    } else if days_until < 3 {
        40.0
    } else if days_until < 7 {
        60.0
    } else if days_until <= 30 {
        100.0
    } else if days_until <= 60 {
        80.0
    } else if days_until <= 90 {
        60.0
    } else if days_until <= 180 {
        40.0
    } else {
        30.0
    }
}

/// §4.4(e). Blends a popularity step function (50%), an event-timing step
/// function (30%), and the section's resale table score (20%).
pub fn resale_score(popularity: u8, days_until: i64, tier: SectionTier) -> f64 {
    let pop = popularity_score(popularity);
    let timing = timing_score(days_until.max(0));
    let section = tier.resale_section_score();
    (pop * 0.5 + timing * 0.3 + section * 0.2).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popularity_step_boundaries() {
        assert_eq!(popularity_score(100), 100.0);
        assert_eq!(popularity_score(90), 100.0);
        assert_eq!(popularity_score(89), 90.0);
        assert_eq!(popularity_score(80), 90.0);
        assert_eq!(popularity_score(79), 70.0);
        assert_eq!(popularity_score(60), 70.0);
        assert_eq!(popularity_score(59), 50.0);
        assert_eq!(popularity_score(40), 50.0);
        assert_eq!(popularity_score(39), 30.0);
        assert_eq!(popularity_score(20), 30.0);
        assert_eq!(popularity_score(19), 20.0);
    }

    #[test]
    fn timing_step_boundaries() {
        assert_eq!(timing_score(0), 20.0);
        assert_eq!(timing_score(2), 40.0);
        assert_eq!(timing_score(6), 60.0);
        assert_eq!(timing_score(30), 100.0);
        assert_eq!(timing_score(60), 80.0);
        assert_eq!(timing_score(90), 60.0);
        assert_eq!(timing_score(180), 40.0);
        assert_eq!(timing_score(181), 30.0);
    }

    #[test]
    fn high_popularity_near_term_premium_section_scores_high() {
        let score = resale_score(95, 14, SectionTier::Premium);
        assert!(score >= 85.0);
    }

    #[test]
    fn low_popularity_far_out_obstructed_section_scores_low() {
        let score = resale_score(5, 200, SectionTier::Obstructed);
        assert!(score <= 35.0);
    }
}
