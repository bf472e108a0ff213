use crate::config::MatcherConfig;
use seatsniper_types::{EventMatch, NormalizedEvent, Platform};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

const VENUE_ALIASES: &[(&str, &str)] = &[
    ("rose garden arena", "Moda Center"),
    ("the garden", "Madison Square Garden"),
    ("msg", "Madison Square Garden"),
    ("staples center", "Crypto.com Arena"),
    ("us airways center", "Footprint Center"),
    ("talking stick resort arena", "Footprint Center"),
];

/// §4.5 name normalization: lowercase, collapse "vs."/"v." into "vs", strip
/// filler tokens, collapse whitespace.
pub fn normalize_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let collapsed = lower.replace("vs.", "vs").replace("v.", "vs");
    let mut words: Vec<&str> = collapsed.split_whitespace().collect();
    words.retain(|w| !matches!(*w, "tickets" | "live" | "concert"));
    words.join(" ")
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// §4.5 venue canonicalization: exact alias lookup, then substring match in
/// either direction, else title-case the raw input.
pub fn venue_canonical(raw: &str) -> String {
    let lower = raw.to_lowercase();
    for (alias, canonical) in VENUE_ALIASES {
        if *alias == lower {
            return canonical.to_string();
        }
    }
    for (alias, canonical) in VENUE_ALIASES {
        if lower.contains(alias) || alias.contains(lower.as_str()) {
            return canonical.to_string();
        }
    }
    title_case(raw)
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let (n, m) = (a.len(), b.len());
    let mut prev = vec![0usize; m + 1];
    let mut curr = vec![0usize; m + 1];
    for i in 1..=n {
        for j in 1..=m {
            curr[j] = if a[i - 1] == b[j - 1] {
                prev[j - 1] + 1
            } else {
                prev[j].max(curr[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[m]
}

/// Similarity of two normalized event names as a 0-100 percentage (§4.5).
/// Two marketplaces routinely label the same event at different verbosity
/// (e.g. "Blazers vs Lakers" vs "Portland Trail Blazers v. LA Lakers
/// tickets"), so similarity is measured as how much of the SHORTER name's
/// content is recoverable as a subsequence of the longer one, rather than a
/// symmetric edit-distance ratio that would punish the longer name's extra
/// words.
pub fn name_similarity(a: &str, b: &str) -> u8 {
    let na: Vec<char> = normalize_name(a).chars().collect();
    let nb: Vec<char> = normalize_name(b).chars().collect();
    let shorter_len = na.len().min(nb.len());
    if shorter_len == 0 {
        return 100;
    }
    let lcs = longest_common_subsequence(&na, &nb);
    let similarity = lcs as f64 / shorter_len as f64 * 100.0;
    similarity.round().clamp(0.0, 100.0) as u8
}

fn time_proximity_score(delta_minutes: i64, max_delta_minutes: i64) -> u8 {
    let ratio = delta_minutes.abs() as f64 / max_delta_minutes as f64;
    ((1.0 - ratio) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// §4.5. Two events match iff within the time window, same canonical venue,
/// and sufficiently similar names. Returns the match confidence when they
/// match.
pub fn event_confidence(a: &NormalizedEvent, b: &NormalizedEvent, config: &MatcherConfig) -> Option<u8> {
    let delta_minutes = (a.date_time - b.date_time).num_minutes();
    if delta_minutes.abs() > config.max_time_delta_minutes {
        return None;
    }
    if venue_canonical(&a.venue.name) != venue_canonical(&b.venue.name) {
        return None;
    }
    let name_sim = name_similarity(&a.name, &b.name);
    if name_sim < config.min_name_similarity {
        return None;
    }

    let time_prox = time_proximity_score(delta_minutes, config.max_time_delta_minutes);
    let confidence = (name_sim as f64 * 0.5 + 100.0 * 0.3 + time_prox as f64 * 0.2).round();
    Some(confidence.clamp(0.0, 100.0) as u8)
}

fn name_hash_30(name: &str) -> String {
    let mut h1 = DefaultHasher::new();
    name.hash(&mut h1);
    let mut h2 = DefaultHasher::new();
    (name, "seed2").hash(&mut h2);
    let combined = format!("{:016x}{:016x}", h1.finish(), h2.finish());
    combined[..30].to_string()
}

fn venue_slug(venue_name: &str) -> String {
    venue_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// §4.5 group assembly. Iterates events in order, greedily absorbing
/// cross-platform matches into the first unprocessed event's group;
/// same-platform pairs are never merged. Only groups spanning at least two
/// platforms are emitted.
pub fn match_events(events: &[NormalizedEvent], config: &MatcherConfig) -> Vec<EventMatch> {
    let mut used = vec![false; events.len()];
    let mut groups = Vec::new();

    for seed_idx in 0..events.len() {
        if used[seed_idx] {
            continue;
        }
        let seed = &events[seed_idx];
        let mut members: HashMap<Platform, NormalizedEvent> = HashMap::new();
        members.insert(seed.id.platform, seed.clone());
        used[seed_idx] = true;
        let mut min_confidence: u8 = 100;

        for other_idx in (seed_idx + 1)..events.len() {
            if used[other_idx] {
                continue;
            }
            let candidate = &events[other_idx];
            if members.contains_key(&candidate.id.platform) {
                continue;
            }
            if let Some(confidence) = event_confidence(seed, candidate, config) {
                members.insert(candidate.id.platform, candidate.clone());
                used[other_idx] = true;
                min_confidence = min_confidence.min(confidence);
            }
        }

        if members.len() < 2 {
            continue;
        }

        let canonical_name = title_case(&normalize_name(&seed.name));
        let venue_name = venue_canonical(&seed.venue.name);
        let group_id = format!(
            "{}_{}_{}",
            name_hash_30(&canonical_name),
            venue_slug(&venue_name),
            seed.date_time.format("%Y-%m-%d")
        );

        if let Ok(group) = EventMatch::new(
            group_id,
            canonical_name,
            venue_name,
            seed.date_time,
            members,
            min_confidence,
        ) {
            groups.push(group);
        }
    }

    groups
}
