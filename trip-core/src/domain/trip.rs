//! Trip plan domain types

use serde::{Deserialize, Deserializer, Serialize};

/// A finished trip plan
///
/// The wire format carries every field as a multi-line string. The two list
/// fields are split into ordered items as soon as they are deserialized, so
/// nothing downstream ever splits them again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripPlan {
    #[serde(deserialize_with = "deserialize_text")]
    pub itinerary: String,
    #[serde(alias = "best_month", deserialize_with = "deserialize_text")]
    pub best_month_to_visit: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub weather: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub budget_breakdown: String,
    #[serde(deserialize_with = "deserialize_lines")]
    pub restaurants: Vec<String>,
    #[serde(deserialize_with = "deserialize_lines")]
    pub hotels: Vec<String>,
}

/// Split a newline-delimited field into trimmed, non-blank items
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Results come from nullable columns; `null` reads as empty text
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts either the wire string or an already split list
fn deserialize_lines<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lines {
        Text(String),
        Items(Vec<String>),
        Missing(()),
    }

    Ok(match Lines::deserialize(deserializer)? {
        Lines::Text(raw) => split_lines(&raw),
        Lines::Items(items) => items,
        Lines::Missing(()) => Vec::new(),
    })
}
