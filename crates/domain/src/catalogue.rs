//! Canonical game records normalized from raw RAWG payloads.
//!
//! The normalizers are total: every field has a default (empty string, zero,
//! empty set, absent rating) and nothing here can panic or error. Nested
//! platform/store/genre entries contribute only when their inner display
//! name is present; everything else is silently dropped.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier plus description for a single game, as returned by the
/// RAWG game-detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub game_id: i64,
    pub name: String,
    pub description: String,
}

impl GameSummary {
    /// Build a summary from the RAWG detail payload, coercing missing or
    /// null fields to safe defaults.
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            game_id: payload.get("id").and_then(Value::as_i64).unwrap_or(0),
            name: text_or_empty(payload.get("name")),
            description: text_or_empty(payload.get("description")),
        }
    }
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}\nID: {}\nDescription: \"{}\"",
            self.name, self.game_id, self.description
        )
    }
}

/// Full metadata for a game as it appears in RAWG search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDetail {
    pub game_id: i64,
    pub name: String,
    /// Average time to beat, in hours.
    pub average_playtime: i64,
    pub platforms: Vec<String>,
    pub stores: Vec<String>,
    pub genres: Vec<String>,
    /// Release date (YYYY-MM-DD), empty when unknown.
    pub released: String,
    /// Metacritic score out of 100, when the game has one.
    pub metacritic_score: Option<i64>,
    /// ESRB maturity rating, when the game has one.
    pub esrb_rating: Option<String>,
}

impl GameDetail {
    /// Normalize a single RAWG search-result entry.
    pub fn from_payload(entry: &Value) -> Self {
        Self {
            game_id: entry.get("id").and_then(Value::as_i64).unwrap_or(0),
            name: text_or_empty(entry.get("name")),
            average_playtime: entry.get("playtime").and_then(Value::as_i64).unwrap_or(0),
            platforms: nested_names(entry.get("platforms"), Some("platform")),
            stores: nested_names(entry.get("stores"), Some("store")),
            genres: nested_names(entry.get("genres"), None),
            released: text_or_empty(entry.get("released")),
            metacritic_score: entry.get("metacritic").and_then(Value::as_i64),
            esrb_rating: entry
                .get("esrb_rating")
                .and_then(Value::as_object)
                .and_then(|rating| rating.get("name_en"))
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Normalize a RAWG search-result array. Anything that is not an array
    /// (absent, null, wrong shape) yields an empty list, not an error.
    pub fn from_search_results(results: &Value) -> Vec<Self> {
        results
            .as_array()
            .map(|entries| entries.iter().map(Self::from_payload).collect())
            .unwrap_or_default()
    }
}

impl fmt::Display for GameDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metacritic = self
            .metacritic_score
            .map(|score| score.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let esrb = self.esrb_rating.as_deref().unwrap_or("N/A");
        let released = if self.released.is_empty() {
            "N/A"
        } else {
            self.released.as_str()
        };

        write!(
            f,
            "Name: {}\nID: {}\nAverage Playtime (hours): {}\nPlatforms: {}\nStores: {}\nGenres: {}\nRelease Date: {}\nMetacritic Rating: {}/100\nMaturity Rating: {}",
            self.name,
            self.game_id,
            self.average_playtime,
            join_or_na(&self.platforms),
            join_or_na(&self.stores),
            join_or_na(&self.genres),
            released,
            metacritic,
            esrb,
        )
    }
}

fn text_or_empty(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

/// Extract display names from a list of entries. With `inner` set, each
/// entry wraps the named object (`{"platform": {"name": ...}}`); without
/// it, the entry carries `name` directly. Entries with no name are dropped.
fn nested_names(entries: Option<&Value>, inner: Option<&str>) -> Vec<String> {
    let Some(entries) = entries.and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match inner {
            Some(key) => entry.get(key).and_then(|wrapped| wrapped.get("name")),
            None => entry.get("name"),
        })
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

fn join_or_na(values: &[String]) -> String {
    if values.is_empty() {
        "N/A".to_string()
    } else {
        values.join(", ")
    }
}
