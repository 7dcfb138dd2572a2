//! Tool registry and dispatcher.
//!
//! A closed mapping from tool name to handler, built once at startup. Every
//! handler resolves to a [`ResultEnvelope`]; nothing that happens inside a
//! handler can abort the conversation turn.

pub mod definitions;
pub mod params;

use std::sync::Arc;

use serde_json::Value;

use self::params::{FindGameByNameParams, FindMultipleGamesParams, GetGameDescriptionParams};
use crate::infrastructure::ports::{CataloguePort, ClockPort, ToolDefinition};
use nerdbot_domain::{GameDetail, GameSummary, ResultEnvelope};

/// How many matches a by-name lookup reports back to the model.
const NAME_SEARCH_RESULT_LIMIT: usize = 3;

const UNKNOWN_DB_ERROR: &str = "An unknown error occurred while fetching from the database.";
const UNPARSEABLE_RESULTS: &str = "Failed to parse database results.";

/// The fixed set of tools the model can call, with their handlers.
pub struct GameToolRegistry {
    catalogue: Arc<dyn CataloguePort>,
    clock: Arc<dyn ClockPort>,
    definitions: Vec<ToolDefinition>,
}

impl GameToolRegistry {
    pub fn new(catalogue: Arc<dyn CataloguePort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            catalogue,
            clock,
            definitions: definitions::build_tool_definitions(),
        }
    }

    /// The tool specifications advertised to the model.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.definitions.clone()
    }

    /// Route a model-issued call to its handler.
    ///
    /// Unknown tool names yield the neutral empty envelope and undecodable
    /// arguments a parsing-failure envelope, so one bad call never aborts
    /// the turn.
    pub async fn dispatch(&self, tool_name: &str, arguments: Value) -> ResultEnvelope {
        match tool_name {
            "get_current_date" => self.get_current_date(),
            "find_game_by_name" => self.find_game_by_name(arguments).await,
            "get_game_description" => self.get_game_description(arguments).await,
            "find_multiple_games" => self.find_multiple_games(arguments).await,
            _ => {
                tracing::warn!(tool = tool_name, "Model requested unknown tool");
                ResultEnvelope::empty()
            }
        }
    }

    /// Local date as prose. No external call.
    fn get_current_date(&self) -> ResultEnvelope {
        let today = self.clock.now().format("%Y-%m-%d");
        ResultEnvelope::ok(Value::String(format!("Today's date is {today}")))
    }

    async fn get_game_description(&self, arguments: Value) -> ResultEnvelope {
        let params: GetGameDescriptionParams = match serde_json::from_value(arguments) {
            Ok(params) => params,
            Err(e) => return ResultEnvelope::fail(format!("Parsing error: {e}")),
        };

        let response = self.catalogue.game_details(params.game_id).await;
        let payload = match database_payload(response) {
            Ok(payload) => payload,
            Err(envelope) => return envelope,
        };

        let summary = GameSummary::from_payload(&payload);
        serialize_results(&summary)
    }

    async fn find_game_by_name(&self, arguments: Value) -> ResultEnvelope {
        let params: FindGameByNameParams = match serde_json::from_value(arguments) {
            Ok(params) => params,
            Err(e) => return ResultEnvelope::fail(format!("Parsing error: {e}")),
        };

        let response = self.catalogue.search_by_name(&params.game_name).await;
        let payload = match database_payload(response) {
            Ok(payload) => payload,
            Err(envelope) => return envelope,
        };

        let games = normalize_search_payload(&payload);
        if games.is_empty() {
            return ResultEnvelope::fail(UNPARSEABLE_RESULTS);
        }

        // The first few matches are the best ones; the rest is noise.
        serialize_results(&games[..games.len().min(NAME_SEARCH_RESULT_LIMIT)])
    }

    async fn find_multiple_games(&self, arguments: Value) -> ResultEnvelope {
        let params: FindMultipleGamesParams = match serde_json::from_value(arguments) {
            Ok(params) => params,
            Err(e) => return ResultEnvelope::fail(format!("Parsing error: {e}")),
        };

        let response = self.catalogue.search_filtered(params.into_query()).await;
        let payload = match database_payload(response) {
            Ok(payload) => payload,
            Err(envelope) => return envelope,
        };

        let games = normalize_search_payload(&payload);
        if games.is_empty() {
            return ResultEnvelope::fail(UNPARSEABLE_RESULTS);
        }

        serialize_results(&games)
    }
}

/// Unwrap a catalogue envelope into its payload, or classify the failure
/// for the model as a database error.
fn database_payload(response: ResultEnvelope) -> Result<Value, ResultEnvelope> {
    let ResultEnvelope {
        success,
        results,
        failure_reason,
    } = response;

    match (success, results) {
        (true, Some(payload)) => Ok(payload),
        _ => {
            let reason = failure_reason.unwrap_or_else(|| UNKNOWN_DB_ERROR.to_string());
            Err(ResultEnvelope::fail(format!("Database error: {reason}")))
        }
    }
}

/// Pull the inner `results` array out of a search payload and normalize it.
fn normalize_search_payload(payload: &Value) -> Vec<GameDetail> {
    payload
        .get("results")
        .map(GameDetail::from_search_results)
        .unwrap_or_default()
}

/// Serialize normalized records into a success envelope. A serialization
/// fault becomes a parsing-failure envelope instead of propagating.
fn serialize_results<T: serde::Serialize + ?Sized>(records: &T) -> ResultEnvelope {
    match serde_json::to_value(records) {
        Ok(value) => ResultEnvelope::ok(value),
        Err(e) => ResultEnvelope::fail(format!("Parsing error: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::GameQuery;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use serde_json::json;
    use std::sync::Mutex;

    /// Catalogue stub that answers every call with a canned envelope and
    /// records the last filtered query it saw.
    struct StubCatalogue {
        response: ResultEnvelope,
        last_query: Mutex<Option<GameQuery>>,
    }

    impl StubCatalogue {
        fn returning(response: ResultEnvelope) -> Arc<Self> {
            Arc::new(Self {
                response,
                last_query: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl CataloguePort for StubCatalogue {
        async fn game_details(&self, _game_id: i64) -> ResultEnvelope {
            self.response.clone()
        }

        async fn search_by_name(&self, _game_name: &str) -> ResultEnvelope {
            self.response.clone()
        }

        async fn search_filtered(&self, query: GameQuery) -> ResultEnvelope {
            *self.last_query.lock().expect("lock") = Some(query);
            self.response.clone()
        }
    }

    fn registry_with(catalogue: Arc<StubCatalogue>) -> GameToolRegistry {
        let clock = Arc::new(FixedClock(
            chrono::Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().expect("valid date"),
        ));
        GameToolRegistry::new(catalogue, clock)
    }

    fn search_body(names: &[&str]) -> Value {
        json!({
            "count": names.len(),
            "results": names
                .iter()
                .enumerate()
                .map(|(i, name)| json!({"id": i + 1, "name": name}))
                .collect::<Vec<_>>()
        })
    }

    #[tokio::test]
    async fn test_unknown_tool_returns_neutral_envelope() {
        let registry = registry_with(StubCatalogue::returning(ResultEnvelope::empty()));

        let envelope = registry.dispatch("cast_fireball", json!({})).await;

        assert!(envelope.success);
        assert_eq!(envelope.results, Some(json!({})));
    }

    #[tokio::test]
    async fn test_get_current_date_uses_clock() {
        let registry = registry_with(StubCatalogue::returning(ResultEnvelope::empty()));

        let envelope = registry.dispatch("get_current_date", json!({})).await;

        assert!(envelope.success);
        assert_eq!(
            envelope.results,
            Some(json!("Today's date is 2024-06-01"))
        );
    }

    #[tokio::test]
    async fn test_find_game_by_name_returns_first_three() {
        let catalogue = StubCatalogue::returning(ResultEnvelope::ok(search_body(&[
            "Dark Souls",
            "Dark Souls II",
            "Dark Souls III",
            "Dark Souls: Remastered",
        ])));
        let registry = registry_with(catalogue);

        let envelope = registry
            .dispatch("find_game_by_name", json!({"game_name": "Dark Souls"}))
            .await;

        assert!(envelope.success);
        let games = envelope.results.expect("results");
        assert_eq!(games.as_array().expect("list").len(), 3);
        assert_eq!(games[0]["name"], "Dark Souls");
    }

    #[tokio::test]
    async fn test_find_game_by_name_zero_matches_is_parse_failure() {
        let catalogue = StubCatalogue::returning(ResultEnvelope::ok(search_body(&[])));
        let registry = registry_with(catalogue);

        let envelope = registry
            .dispatch("find_game_by_name", json!({"game_name": "Zxqqxz12345"}))
            .await;

        assert!(!envelope.success);
        assert_eq!(
            envelope.failure_reason.as_deref(),
            Some("Failed to parse database results.")
        );
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_database_error() {
        let catalogue =
            StubCatalogue::returning(ResultEnvelope::fail("connection refused (127.0.0.1:443)"));
        let registry = registry_with(catalogue);

        let envelope = registry
            .dispatch("find_game_by_name", json!({"game_name": "Portal"}))
            .await;

        assert!(!envelope.success);
        let reason = envelope.failure_reason.expect("reason");
        assert!(reason.starts_with("Database error: "));
        assert!(reason.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_bad_arguments_become_parsing_error() {
        let registry = registry_with(StubCatalogue::returning(ResultEnvelope::empty()));

        let envelope = registry
            .dispatch("get_game_description", json!({"game_id": "not-a-number"}))
            .await;

        assert!(!envelope.success);
        assert!(envelope
            .failure_reason
            .expect("reason")
            .starts_with("Parsing error: "));
    }

    #[tokio::test]
    async fn test_get_game_description_normalizes_payload() {
        let catalogue = StubCatalogue::returning(ResultEnvelope::ok(json!({
            "id": 3498,
            "name": "Grand Theft Auto V",
            "description": "Rockstar's open world classic."
        })));
        let registry = registry_with(catalogue);

        let envelope = registry
            .dispatch("get_game_description", json!({"game_id": 3498}))
            .await;

        assert!(envelope.success);
        let summary = envelope.results.expect("summary");
        assert_eq!(summary["game_id"], 3498);
        assert_eq!(summary["description"], "Rockstar's open world classic.");
    }

    #[tokio::test]
    async fn test_find_multiple_games_translates_slugs() {
        let catalogue = StubCatalogue::returning(ResultEnvelope::ok(search_body(&["Returnal"])));
        let registry = registry_with(catalogue.clone());

        let envelope = registry
            .dispatch(
                "find_multiple_games",
                json!({
                    "platforms": ["playstation5", "made-up-console"],
                    "stores": "steam",
                    "ordering": "-metacritic"
                }),
            )
            .await;

        assert!(envelope.success);
        let query = catalogue
            .last_query
            .lock()
            .expect("lock")
            .clone()
            .expect("query captured");
        assert_eq!(query.platform_ids, vec![187]);
        assert_eq!(query.store_ids, vec![1]);
        assert_eq!(query.ordering.as_deref(), Some("-metacritic"));
        assert_eq!(query.page_size, 5);
    }

    #[tokio::test]
    async fn test_find_multiple_games_zero_matches_is_parse_failure() {
        let catalogue = StubCatalogue::returning(ResultEnvelope::ok(search_body(&[])));
        let registry = registry_with(catalogue);

        let envelope = registry
            .dispatch("find_multiple_games", json!({"genres": ["action"]}))
            .await;

        assert!(!envelope.success);
        assert_eq!(
            envelope.failure_reason.as_deref(),
            Some("Failed to parse database results.")
        );
    }
}
