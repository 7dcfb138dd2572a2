//! Strongly-typed tool parameters decoded from model-issued JSON arguments.
//!
//! Models serialize arguments loosely: list-typed parameters may arrive as
//! a bare scalar, a list, or null. The deserializers here coerce all three
//! shapes (scalar becomes a one-element list, null/absent an empty one)
//! before a handler ever sees them.

use serde::{Deserialize, Deserializer};

use crate::infrastructure::ports::GameQuery;
use nerdbot_domain::slugs;

/// Arguments for `find_game_by_name`.
#[derive(Debug, Deserialize)]
pub struct FindGameByNameParams {
    pub game_name: String,
}

/// Arguments for `get_game_description`.
#[derive(Debug, Deserialize)]
pub struct GetGameDescriptionParams {
    pub game_id: i64,
}

/// Arguments for `find_multiple_games`. Every filter is optional.
#[derive(Debug, Deserialize)]
pub struct FindMultipleGamesParams {
    #[serde(default = "default_num_results")]
    pub num_results: u8,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar_or_list")]
    pub parent_platforms: Vec<String>,
    #[serde(default, deserialize_with = "scalar_or_list")]
    pub platforms: Vec<String>,
    #[serde(default, deserialize_with = "scalar_or_list")]
    pub stores: Vec<String>,
    #[serde(default, deserialize_with = "scalar_or_list")]
    pub developers: Vec<String>,
    #[serde(default, deserialize_with = "scalar_or_list")]
    pub publishers: Vec<String>,
    #[serde(default, deserialize_with = "scalar_or_list")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "scalar_or_list")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub release_date_lower_bound: Option<String>,
    #[serde(default)]
    pub release_date_upper_bound: Option<String>,
    #[serde(default)]
    pub metacritic_lower_bound: Option<i64>,
    #[serde(default)]
    pub metacritic_upper_bound: Option<i64>,
    #[serde(default)]
    pub ordering: Option<String>,
}

fn default_num_results() -> u8 {
    5
}

impl FindMultipleGamesParams {
    /// Translate decoded parameters into a catalogue query: slugs become
    /// provider ids (unknown slugs are dropped), numeric values clamp to
    /// their legal ranges, and an ordering key outside the allow-list is
    /// discarded rather than forwarded to the provider.
    pub fn into_query(self) -> GameQuery {
        let ordering = self.ordering.filter(|key| {
            let legal = slugs::ORDERINGS.contains(&key.as_str());
            if !legal {
                tracing::debug!(ordering = %key, "Dropping unrecognized ordering key");
            }
            legal
        });

        GameQuery {
            page_size: self.num_results.clamp(1, 25),
            title: self.title,
            parent_platform_ids: slugs::parent_platform_ids(&self.parent_platforms),
            platform_ids: slugs::platform_ids(&self.platforms),
            store_ids: slugs::store_ids(&self.stores),
            developers: self.developers,
            publishers: self.publishers,
            genres: self.genres,
            tags: self.tags,
            release_date_lower_bound: self.release_date_lower_bound,
            release_date_upper_bound: self.release_date_upper_bound,
            metacritic_lower_bound: self.metacritic_lower_bound.map(|v| v.clamp(0, 100)),
            metacritic_upper_bound: self.metacritic_upper_bound.map(|v| v.clamp(0, 100)),
            ordering,
        }
    }
}

/// Accept a bare string, a list of strings, or null for a list parameter.
fn scalar_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ScalarOrList {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<ScalarOrList>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(ScalarOrList::One(value)) => vec![value],
        Some(ScalarOrList::Many(values)) => values,
    })
}
