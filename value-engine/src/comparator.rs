use crate::config::MISSING_SECTION_NUMBER;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use seatsniper_types::{NormalizedEvent, NormalizedListing, Platform};
use std::collections::HashMap;

/// §4.6 section-name normalization for cross-platform comparison.
pub fn normalize_section(section: &str) -> String {
    let lower = section.to_lowercase().replace("sec.", "section");

    let cleaned: String = lower
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();

    let mut words: Vec<String> = Vec::new();
    for word in cleaned.split_whitespace() {
        if word == "row" {
            break;
        }
        if word == "ga" {
            words.push("general".to_string());
            words.push("admission".to_string());
        } else {
            words.push(word.to_string());
        }
    }
    words.join(" ")
}

fn section_sort_key(normalized_section: &str) -> u32 {
    let digits: String = normalized_section.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(MISSING_SECTION_NUMBER)
}

#[derive(Debug, Clone)]
pub struct SectionComparison {
    pub section: String,
    /// Cheapest listing per platform for this section, sorted ascending by price.
    pub cheapest_per_platform: Vec<(Platform, NormalizedListing)>,
    pub savings: Decimal,
    pub savings_percent: u32,
}

impl SectionComparison {
    pub fn best(&self) -> Option<&(Platform, NormalizedListing)> {
        self.cheapest_per_platform.first()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PriceComparison {
    pub sections: Vec<SectionComparison>,
}

impl PriceComparison {
    pub fn overall_best(&self) -> Option<(&str, &Platform, &NormalizedListing)> {
        self.sections
            .iter()
            .filter_map(|s| s.best().map(|(p, l)| (s.section.as_str(), p, l)))
            .min_by_key(|(_, _, l)| l.price_per_ticket)
    }
}

/// §4.6. Requires listings from at least two platforms; otherwise returns an
/// empty comparison.
pub fn compare_prices(
    platform_listings: &HashMap<Platform, (NormalizedEvent, Vec<NormalizedListing>)>,
) -> PriceComparison {
    if platform_listings.len() < 2 {
        return PriceComparison::default();
    }

    let mut by_section: HashMap<String, HashMap<Platform, NormalizedListing>> = HashMap::new();
    for (platform, (_event, listings)) in platform_listings {
        for listing in listings {
            let normalized = normalize_section(&listing.section);
            let entry = by_section.entry(normalized).or_default();
            let better = match entry.get(platform) {
                Some(existing) => listing.price_per_ticket < existing.price_per_ticket,
                None => true,
            };
            if better {
                entry.insert(*platform, listing.clone());
            }
        }
    }

    let mut sections: Vec<SectionComparison> = by_section
        .into_iter()
        .map(|(section, per_platform)| {
            let mut cheapest_per_platform: Vec<(Platform, NormalizedListing)> =
                per_platform.into_iter().collect();
            cheapest_per_platform.sort_by_key(|(_, l)| l.price_per_ticket);

            let (savings, savings_percent) = if cheapest_per_platform.len() >= 2 {
                let best_price = cheapest_per_platform[0].1.price_per_ticket;
                let next_price = cheapest_per_platform[1].1.price_per_ticket;
                let savings = next_price - best_price;
                let percent = if next_price > Decimal::ZERO {
                    (savings / next_price * Decimal::from(100))
                        .round()
                        .to_u32()
                        .unwrap_or(0)
                } else {
                    0
                };
                (savings, percent)
            } else {
                (Decimal::ZERO, 0)
            };

            SectionComparison {
                section,
                cheapest_per_platform,
                savings,
                savings_percent,
            }
        })
        .collect();

    sections.sort_by_key(|s| section_sort_key(&s.section));
    PriceComparison { sections }
}
