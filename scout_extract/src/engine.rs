//! Deterministic, table-driven extraction.

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use scout_core::{Extraction, ParameterExtractor, SearchParameters};

use crate::patterns::{
    AMENITY_KEYWORDS, CATEGORY_KEYWORDS, DAY_PATTERNS, DESTINATION_PATTERNS, DIETARY_KEYWORDS,
    LOCATION_PATTERNS, PARTY_SIZE_PATTERN, SPECIFIC_TIME_PATTERN, TIME_PATTERNS, VIBE_PATTERNS,
};

/// Best-effort extractor built on the static keyword and regex tables.
///
/// Every pass is independent of the others; only the order inside a table
/// decides between competing matches. Never fails: a prompt with no matches
/// yields an all-absent record.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl PatternExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn extract(&self, prompt: &str) -> SearchParameters {
        if prompt.trim().is_empty() {
            return SearchParameters::default();
        }

        let lower = prompt.to_lowercase();

        let params = SearchParameters {
            category: category(&lower),
            dietary_restrictions: labels_present(&lower, DIETARY_KEYWORDS),
            amenities: labels_present(&lower, AMENITY_KEYWORDS),
            location_context: first_match(&lower, &LOCATION_PATTERNS).map(|c| c.as_str().into()),
            destination: destination(prompt),
            time_preference: first_match(&lower, &TIME_PATTERNS).map(|t| t.as_str().into()),
            specific_time: specific_time(&lower),
            day_preference: first_match(&lower, &DAY_PATTERNS).map(|d| d.as_str().into()),
            party_size: party_size(&lower),
            vibe: first_match(&lower, &VIBE_PATTERNS).map(|v| v.as_str().into()),
            ..SearchParameters::default()
        };

        debug!(
            "Pattern extraction matched {} field(s)",
            params.populated_fields().len()
        );
        params
    }
}

#[async_trait]
impl ParameterExtractor for PatternExtractor {
    async fn extract(&self, prompt: &str) -> Extraction {
        Extraction::from_patterns(Self::extract(self, prompt))
    }
}

fn category(lower: &str) -> Option<String> {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, category)| category.as_str().to_string())
}

fn labels_present(lower: &str, table: &[(&str, &[&str])]) -> Vec<String> {
    table
        .iter()
        .filter(|(_, synonyms)| synonyms.iter().any(|s| lower.contains(s)))
        .map(|(label, _)| (*label).to_string())
        .collect()
}

fn first_match<T: Copy>(lower: &str, table: &[(Regex, T)]) -> Option<T> {
    table
        .iter()
        .find(|(re, _)| re.is_match(lower))
        .map(|(_, value)| *value)
}

fn destination(prompt: &str) -> Option<String> {
    DESTINATION_PATTERNS.iter().find_map(|re| {
        re.captures(prompt)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// Normalises the first clock time to 24-hour "HH:MM".
///
/// The hour is not range-checked: "13pm" becomes "25:00".
fn specific_time(lower: &str) -> Option<String> {
    let caps = SPECIFIC_TIME_PATTERN.captures(lower)?;
    let mut hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    match caps.get(3)?.as_str() {
        "pm" | "afternoon" | "evening" if hour != 12 => hour += 12,
        "am" | "morning" if hour == 12 => hour = 0,
        _ => {}
    }

    Some(format!("{hour:02}:{minute:02}"))
}

fn party_size(lower: &str) -> Option<u32> {
    PARTY_SIZE_PATTERN
        .captures(lower)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}
