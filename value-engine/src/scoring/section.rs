use seatsniper_types::SectionTier;
use std::collections::HashMap;

fn normalize(section: &str) -> String {
    let upper = section.to_uppercase();
    upper.replace("SECTION", "").replace("SEC", "").trim().to_string()
}

fn digits_only(section: &str) -> String {
    section.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// §4.4(b) tier resolution, tried in order: exact match against the
/// caller-supplied map, normalized-name match, numeric-only match, a fixed
/// keyword heuristic, a numeric-range heuristic, then a MID_TIER default.
pub fn resolve_section_tier(
    section: Option<&str>,
    section_tiers: &HashMap<String, SectionTier>,
) -> SectionTier {
    let Some(section) = section else {
        return SectionTier::MidTier;
    };

    if let Some(tier) = section_tiers.get(section) {
        return *tier;
    }

    let normalized = normalize(section);
    if let Some(tier) = section_tiers.get(&normalized) {
        return *tier;
    }

    let digits = digits_only(section);
    if !digits.is_empty() {
        if let Some(tier) = section_tiers.get(&digits) {
            return *tier;
        }
    }

    let lower = section.to_lowercase();
    if ["floor", "pit", "vip", "club", "courtside", "field", "diamond"]
        .iter()
        .any(|kw| lower.contains(kw))
    {
        return SectionTier::Premium;
    }
    if ["lower", "terrace", "box"].iter().any(|kw| lower.contains(kw)) {
        return SectionTier::UpperPremium;
    }
    if ["upper", "balcony", "gallery", "mezzanine"]
        .iter()
        .any(|kw| lower.contains(kw))
    {
        return SectionTier::UpperLevel;
    }
    if ["obstructed", "limited", "partial", "behind"]
        .iter()
        .any(|kw| lower.contains(kw))
    {
        return SectionTier::Obstructed;
    }

    if !digits.is_empty() {
        if let Ok(n) = digits.parse::<u32>() {
            if (100..=199).contains(&n) {
                return SectionTier::UpperPremium;
            }
            if (200..=299).contains(&n) {
                return SectionTier::MidTier;
            }
            if n >= 300 {
                return SectionTier::UpperLevel;
            }
        }
    }

    SectionTier::MidTier
}
