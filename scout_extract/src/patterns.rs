//! Keyword and regex tables for the pattern extractor.
//!
//! Table order is significant: single-valued fields take the first entry that
//! matches, multi-valued fields are emitted in table order. Regexes are
//! compiled once on first use and shared read-only afterwards.

use once_cell::sync::Lazy;
use regex::Regex;

use scout_core::{Category, DayPreference, LocationContext, TimePreference, Vibe};

/// Trigger keyword to venue category. The first keyword found wins.
pub const CATEGORY_KEYWORDS: &[(&str, Category)] = &[
    ("cafe", Category::Cafe),
    ("coffee", Category::Cafe),
    ("restaurant", Category::Restaurant),
    ("dining", Category::Restaurant),
    ("bar", Category::Bar),
    ("pub", Category::Bar),
    ("club", Category::Club),
    ("museum", Category::Museum),
    ("gallery", Category::Museum),
    ("park", Category::Outdoors),
    ("hiking", Category::Outdoors),
    ("tour", Category::Tour),
    ("shopping", Category::Shopping),
    ("mall", Category::Shopping),
    ("spa", Category::Spa),
    ("wellness", Category::Spa),
    ("hotel", Category::Accommodation),
    ("motel", Category::Accommodation),
    ("gas station", Category::Service),
    ("rest stop", Category::Service),
    ("bathroom", Category::Service),
];

/// Dietary restriction to the synonyms that signal it.
pub const DIETARY_KEYWORDS: &[(&str, &[&str])] = &[
    ("vegan", &["vegan", "plant-based"]),
    ("vegetarian", &["vegetarian", "veggie"]),
    ("gluten-free", &["gluten-free", "gluten free", "celiac"]),
    ("keto", &["keto", "ketogenic"]),
    ("halal", &["halal"]),
    ("kosher", &["kosher"]),
    ("dairy-free", &["dairy-free", "dairy free", "lactose-free"]),
];

/// Amenity to the synonyms that signal it.
pub const AMENITY_KEYWORDS: &[(&str, &[&str])] = &[
    ("wifi", &["wifi", "internet", "wireless"]),
    ("parking", &["parking", "park", "garage"]),
    ("outdoor seating", &["outdoor", "patio", "terrace", "outside"]),
    (
        "pet friendly",
        &["pet friendly", "dog friendly", "pets allowed"],
    ),
    (
        "wheelchair accessible",
        &["accessible", "wheelchair", "handicap"],
    ),
    ("clean bathrooms", &["clean bathroom", "restroom", "toilet"]),
    ("food", &["food", "snacks", "meals", "dining"]),
    ("gas", &["gas", "fuel", "gasoline"]),
    ("atm", &["atm", "cash machine", "banking"]),
];

#[expect(
    clippy::expect_used,
    reason = "Static regex patterns are covered by the table tests"
)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Static regex pattern is guaranteed to be valid")
}

pub static LOCATION_PATTERNS: Lazy<Vec<(Regex, LocationContext)>> = Lazy::new(|| {
    vec![
        (compile(r"halfway|midpoint|middle"), LocationContext::Halfway),
        (
            compile(r"near.*destination|close.*to.*destination"),
            LocationContext::NearDestination,
        ),
        (
            compile(r"on.*route|along.*way|on.*way"),
            LocationContext::OnRoute,
        ),
    ]
});

/// Applied to the original-case prompt; a place name is one or more
/// capitalised words.
pub static DESTINATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["to", "in", "at", "near"]
        .iter()
        .map(|prep| compile(&format!(r"{prep}\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)")))
        .collect()
});

pub static TIME_PATTERNS: Lazy<Vec<(Regex, TimePreference)>> = Lazy::new(|| {
    vec![
        (compile(r"morning|am|before.*noon"), TimePreference::Morning),
        (
            compile(r"afternoon|pm.*after.*noon"),
            TimePreference::Afternoon,
        ),
        (compile(r"evening|night|after.*dark"), TimePreference::Evening),
        (
            compile(r"after.*work|after.*5|after.*6"),
            TimePreference::AfterWork,
        ),
    ]
});

/// Clock time with an optional minute part and a period word. Digits are
/// ASCII only.
pub static SPECIFIC_TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| compile(r"([0-9]{1,2}):?([0-9]{2})?\s*(am|pm|morning|afternoon|evening)"));

pub static DAY_PATTERNS: Lazy<Vec<(Regex, DayPreference)>> = Lazy::new(|| {
    vec![
        (compile(r"today"), DayPreference::Today),
        (compile(r"tomorrow"), DayPreference::Tomorrow),
        (compile(r"weekend|saturday|sunday"), DayPreference::Weekend),
    ]
});

pub static PARTY_SIZE_PATTERN: Lazy<Regex> =
    Lazy::new(|| compile(r"([0-9]+)\s*(people|person|guests?)"));

pub static VIBE_PATTERNS: Lazy<Vec<(Regex, Vibe)>> = Lazy::new(|| {
    vec![
        (compile(r"romantic|date|intimate"), Vibe::Romantic),
        (compile(r"casual|relaxed|informal"), Vibe::Casual),
        (compile(r"business|professional|formal"), Vibe::Business),
        (compile(r"family|kid.*friendly|children"), Vibe::Family),
    ]
});
