//! Closed vocabularies produced by the pattern extractor.
//!
//! The record itself stores plain strings so that values coming back from a
//! delegate are kept even when they fall outside these sets.

use serde::{Deserialize, Serialize};

/// Canonical venue category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cafe,
    Restaurant,
    Bar,
    Club,
    Museum,
    Outdoors,
    Tour,
    Shopping,
    Spa,
    Accommodation,
    Service,
}

impl Category {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cafe => "cafe",
            Self::Restaurant => "restaurant",
            Self::Bar => "bar",
            Self::Club => "club",
            Self::Museum => "museum",
            Self::Outdoors => "outdoors",
            Self::Tour => "tour",
            Self::Shopping => "shopping",
            Self::Spa => "spa",
            Self::Accommodation => "accommodation",
            Self::Service => "service",
        }
    }
}

/// Where along the route the place should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationContext {
    #[serde(rename = "halfway")]
    Halfway,
    #[serde(rename = "near destination")]
    NearDestination,
    #[serde(rename = "on route")]
    OnRoute,
}

impl LocationContext {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Halfway => "halfway",
            Self::NearDestination => "near destination",
            Self::OnRoute => "on route",
        }
    }
}

/// Coarse time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimePreference {
    #[serde(rename = "morning")]
    Morning,
    #[serde(rename = "afternoon")]
    Afternoon,
    #[serde(rename = "evening")]
    Evening,
    #[serde(rename = "after work")]
    AfterWork,
}

impl TimePreference {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::AfterWork => "after work",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPreference {
    Today,
    Tomorrow,
    Weekend,
}

impl DayPreference {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::Weekend => "weekend",
        }
    }
}

/// Atmosphere the user is after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vibe {
    Romantic,
    Casual,
    Business,
    Family,
}

impl Vibe {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Romantic => "romantic",
            Self::Casual => "casual",
            Self::Business => "business",
            Self::Family => "family",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_as_str!(Category, LocationContext, TimePreference, DayPreference, Vibe);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn serde_names_match_as_str() {
        let json = serde_json::to_string(&LocationContext::NearDestination)
            .expect("enum should serialize");
        assert_eq!(json, "\"near destination\"");

        let json =
            serde_json::to_string(&TimePreference::AfterWork).expect("enum should serialize");
        assert_eq!(json, "\"after work\"");

        let json = serde_json::to_string(&Category::Accommodation).expect("enum should serialize");
        assert_eq!(json, format!("\"{}\"", Category::Accommodation.as_str()));
    }

    #[test]
    fn display_uses_canonical_name() {
        assert_eq!(Vibe::Family.to_string(), "family");
        assert_eq!(DayPreference::Weekend.to_string(), "weekend");
        assert_eq!(LocationContext::OnRoute.to_string(), "on route");
    }
}
