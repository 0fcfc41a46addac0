//! The search-parameter record and its transport projection.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Field names in transport order.
pub const FIELD_NAMES: [&str; 15] = [
    "category",
    "event_type",
    "amenities",
    "dietary_restrictions",
    "price_range",
    "location_context",
    "destination",
    "origin",
    "route_preference",
    "time_preference",
    "specific_time",
    "day_preference",
    "party_size",
    "vibe",
    "accessibility_needs",
];

/// Structured search parameters extracted from a natural-language prompt.
///
/// Every field is independently optional: `None` means "unknown", not "no
/// preference". List fields are never null and default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParameters {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub amenities: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub location_context: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub route_preference: Option<String>,
    #[serde(default)]
    pub time_preference: Option<String>,
    /// 24-hour "HH:MM".
    #[serde(default)]
    pub specific_time: Option<String>,
    #[serde(default)]
    pub day_preference: Option<String>,
    #[serde(default)]
    pub party_size: Option<u32>,
    #[serde(default)]
    pub vibe: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub accessibility_needs: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SearchParameters {
    /// True when no field carries a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Project into an ordered key/value map with every field present.
    #[must_use]
    pub fn to_mapping(&self) -> Map<String, Value> {
        let mut map = Map::with_capacity(FIELD_NAMES.len());
        map.insert("category".into(), self.category.clone().into());
        map.insert("event_type".into(), self.event_type.clone().into());
        map.insert("amenities".into(), self.amenities.clone().into());
        map.insert(
            "dietary_restrictions".into(),
            self.dietary_restrictions.clone().into(),
        );
        map.insert("price_range".into(), self.price_range.clone().into());
        map.insert(
            "location_context".into(),
            self.location_context.clone().into(),
        );
        map.insert("destination".into(), self.destination.clone().into());
        map.insert("origin".into(), self.origin.clone().into());
        map.insert(
            "route_preference".into(),
            self.route_preference.clone().into(),
        );
        map.insert(
            "time_preference".into(),
            self.time_preference.clone().into(),
        );
        map.insert("specific_time".into(), self.specific_time.clone().into());
        map.insert("day_preference".into(), self.day_preference.clone().into());
        map.insert("party_size".into(), self.party_size.into());
        map.insert("vibe".into(), self.vibe.clone().into());
        map.insert(
            "accessibility_needs".into(),
            self.accessibility_needs.clone().into(),
        );
        map
    }

    /// Non-empty fields rendered for human display, in transport order.
    #[must_use]
    pub fn populated_fields(&self) -> Vec<(&'static str, String)> {
        let mapping = self.to_mapping();
        FIELD_NAMES
            .iter()
            .filter_map(|name| {
                let rendered = match mapping.get(*name)? {
                    Value::String(s) if !s.is_empty() => s.clone(),
                    Value::Array(items) if !items.is_empty() => items
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(", "),
                    Value::Number(n) if n.as_u64() != Some(0) => n.to_string(),
                    _ => return None,
                };
                Some((*name, rendered))
            })
            .collect()
    }
}
