//! RAWG game-catalogue client.
//!
//! One retrying GET primitive; every endpoint funnels through it. A 2xx
//! response is a success even when the result set is empty. Only transport
//! failures (connection errors, timeouts, non-2xx statuses, undecodable
//! bodies) are retried, with exponential backoff between attempts.

use std::time::Duration;

use async_trait::async_trait;

use crate::infrastructure::ports::{CataloguePort, GameQuery};
use crate::infrastructure::retry::RetryConfig;
use nerdbot_domain::ResultEnvelope;

/// Default RAWG API base URL.
pub const DEFAULT_RAWG_BASE_URL: &str = "https://api.rawg.io/api";

/// Effectively unbounded date span used when no release-date filter is set.
const OPEN_DATE_SPAN: (&str, &str) = ("1800-01-01", "3000-01-01");

/// Full metacritic span used when no score filter is set.
const FULL_METACRITIC_SPAN: (i64, i64) = (0, 100);

// Short connect timeout to fail fast on unreachable hosts, longer read
// timeout to tolerate slow responses.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
const READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the catalogue client, injected at startup.
#[derive(Debug, Clone)]
pub struct RawgConfig {
    pub base_url: String,
    pub api_key: String,
    pub retry: RetryConfig,
}

impl RawgConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_RAWG_BASE_URL.to_string(),
            api_key: api_key.into(),
            retry: RetryConfig::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// Client for the RAWG games API. Owns its connection pool; the pool is
/// safe for concurrent use by multiple in-flight requests.
#[derive(Clone)]
pub struct RawgClient {
    client: reqwest::Client,
    config: RawgConfig,
}

impl RawgClient {
    pub fn new(config: RawgConfig) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(READ_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, config }
    }

    /// Execute a GET with retry. Returns a success envelope carrying the
    /// decoded JSON body, or a failure envelope carrying the last transport
    /// error after the attempt budget is exhausted.
    async fn request(&self, path: &str, params: &[(String, String)]) -> ResultEnvelope {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        let mut last_error = String::new();

        for attempt in 1..=self.config.retry.max_attempts {
            let delay = self.config.retry.backoff_delay(attempt);
            if !delay.is_zero() {
                tracing::warn!(
                    attempt,
                    max_attempts = self.config.retry.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %last_error,
                    "Catalogue request failed, retrying..."
                );
                tokio::time::sleep(delay).await;
            }

            match self.attempt(&url, params).await {
                Ok(body) => {
                    if attempt > 1 {
                        tracing::info!(attempt, "Catalogue request succeeded after retry");
                    }
                    return ResultEnvelope::ok(body);
                }
                Err(error) => last_error = error,
            }
        }

        tracing::error!(
            attempts = self.config.retry.max_attempts,
            error = %last_error,
            "Catalogue request failed after all retry attempts"
        );
        ResultEnvelope::fail(last_error)
    }

    async fn attempt(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<serde_json::Value, String> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        response.json().await.map_err(|e| e.to_string())
    }

    fn base_params(&self) -> Vec<(String, String)> {
        vec![
            ("key".to_string(), self.config.api_key.clone()),
            ("exclude_additions".to_string(), "true".to_string()),
        ]
    }
}

#[async_trait]
impl CataloguePort for RawgClient {
    async fn game_details(&self, game_id: i64) -> ResultEnvelope {
        self.request(&format!("games/{game_id}"), &self.base_params())
            .await
    }

    async fn search_by_name(&self, game_name: &str) -> ResultEnvelope {
        let mut params = self.base_params();
        params.push(("search".to_string(), game_name.to_string()));
        self.request("games", &params).await
    }

    async fn search_filtered(&self, query: GameQuery) -> ResultEnvelope {
        let mut params = self.base_params();
        params.push(("page_size".to_string(), query.page_size.to_string()));

        // Absent bounds widen to the full legal span so an unset filter
        // behaves as "no constraint" instead of a provider-side error.
        let date_low = query
            .release_date_lower_bound
            .unwrap_or_else(|| OPEN_DATE_SPAN.0.to_string());
        let date_high = query
            .release_date_upper_bound
            .unwrap_or_else(|| OPEN_DATE_SPAN.1.to_string());
        params.push(("dates".to_string(), format!("{date_low},{date_high}")));

        let score_low = query.metacritic_lower_bound.unwrap_or(FULL_METACRITIC_SPAN.0);
        let score_high = query.metacritic_upper_bound.unwrap_or(FULL_METACRITIC_SPAN.1);
        params.push(("metacritic".to_string(), format!("{score_low},{score_high}")));

        if let Some(title) = query.title {
            params.push(("search".to_string(), title));
        }

        push_joined_ids(&mut params, "parent_platforms", &query.parent_platform_ids);
        push_joined_ids(&mut params, "platforms", &query.platform_ids);
        push_joined_ids(&mut params, "stores", &query.store_ids);
        push_joined(&mut params, "developers", &query.developers);
        push_joined(&mut params, "publishers", &query.publishers);
        push_joined(&mut params, "genres", &query.genres);
        push_joined(&mut params, "tags", &query.tags);

        if let Some(ordering) = query.ordering {
            params.push(("ordering".to_string(), ordering));
        }

        self.request("games", &params).await
    }
}

fn push_joined_ids(params: &mut Vec<(String, String)>, key: &str, ids: &[i64]) {
    if ids.is_empty() {
        return;
    }
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    params.push((key.to_string(), joined));
}

fn push_joined(params: &mut Vec<(String, String)>, key: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    params.push((key.to_string(), values.join(",")));
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{RawQuery, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::Router;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    struct Upstream {
        hits: AtomicU32,
        failures_before_success: u32,
        last_query: Mutex<Option<String>>,
        body: serde_json::Value,
    }

    impl Upstream {
        fn new(failures_before_success: u32, body: serde_json::Value) -> Arc<Self> {
            Arc::new(Self {
                hits: AtomicU32::new(0),
                failures_before_success,
                last_query: Mutex::new(None),
                body,
            })
        }
    }

    async fn upstream_handler(
        State(upstream): State<Arc<Upstream>>,
        RawQuery(query): RawQuery,
    ) -> axum::response::Response {
        *upstream.last_query.lock().unwrap() = query;
        let hit = upstream.hits.fetch_add(1, Ordering::SeqCst);
        if hit < upstream.failures_before_success {
            (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
        } else {
            axum::Json(upstream.body.clone()).into_response()
        }
    }

    /// Serve the stub upstream on an ephemeral local port.
    async fn serve(upstream: Arc<Upstream>) -> (String, tokio::task::JoinHandle<()>) {
        let router = Router::new()
            .route("/games", get(upstream_handler))
            .route("/games/{id}", get(upstream_handler))
            .with_state(upstream);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        (format!("http://{addr}"), handle)
    }

    fn fast_retry() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            base_delay_ms: 1,
            max_delay_ms: 10,
        }
    }

    fn client_for(base_url: &str) -> RawgClient {
        RawgClient::new(
            RawgConfig::new("test-key")
                .with_base_url(base_url)
                .with_retry(fast_retry()),
        )
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let upstream = Upstream::new(0, serde_json::json!({"results": [{"id": 1}]}));
        let (base_url, server) = serve(upstream.clone()).await;

        let envelope = client_for(&base_url).search_by_name("portal").await;

        assert!(envelope.success);
        assert_eq!(upstream.hits.load(Ordering::SeqCst), 1);
        server.abort();
    }

    #[tokio::test]
    async fn test_retries_then_succeeds() {
        let upstream = Upstream::new(2, serde_json::json!({"results": []}));
        let (base_url, server) = serve(upstream.clone()).await;

        let envelope = client_for(&base_url).search_by_name("portal").await;

        // Two failures, then the third attempt lands.
        assert!(envelope.success);
        assert_eq!(upstream.hits.load(Ordering::SeqCst), 3);
        server.abort();
    }

    #[tokio::test]
    async fn test_exhausted_attempts_return_failure_envelope() {
        let upstream = Upstream::new(u32::MAX, serde_json::json!({}));
        let (base_url, server) = serve(upstream.clone()).await;

        let envelope = client_for(&base_url).game_details(42).await;

        assert!(!envelope.success);
        assert!(envelope
            .failure_reason
            .as_deref()
            .is_some_and(|reason| !reason.is_empty()));
        assert_eq!(upstream.hits.load(Ordering::SeqCst), 3);
        server.abort();
    }

    #[tokio::test]
    async fn test_empty_result_set_is_success_not_retried() {
        let upstream = Upstream::new(0, serde_json::json!({"count": 0, "results": []}));
        let (base_url, server) = serve(upstream.clone()).await;

        let envelope = client_for(&base_url).search_by_name("zxqqxz").await;

        assert!(envelope.success);
        assert_eq!(
            envelope.results.expect("body")["results"],
            serde_json::json!([])
        );
        assert_eq!(upstream.hits.load(Ordering::SeqCst), 1);
        server.abort();
    }

    #[tokio::test]
    async fn test_unreachable_host_fails_without_panicking() {
        // Nothing listens here; connections are refused immediately.
        let client = client_for("http://127.0.0.1:1");

        let envelope = client.search_by_name("portal").await;

        assert!(!envelope.success);
        assert!(envelope.failure_reason.is_some());
    }

    #[tokio::test]
    async fn test_filtered_search_defaults_open_bounds() {
        let upstream = Upstream::new(0, serde_json::json!({"results": []}));
        let (base_url, server) = serve(upstream.clone()).await;

        client_for(&base_url)
            .search_filtered(GameQuery::default())
            .await;

        let query = upstream.last_query.lock().unwrap().clone().expect("query");
        assert!(query.contains("key=test-key"));
        assert!(query.contains("exclude_additions=true"));
        assert!(query.contains("page_size=5"));
        assert!(query.contains("dates=1800-01-01%2C3000-01-01"));
        assert!(query.contains("metacritic=0%2C100"));
        // No list filters were set, so none appear.
        assert!(!query.contains("platforms="));
        assert!(!query.contains("ordering="));
        server.abort();
    }

    #[tokio::test]
    async fn test_filtered_search_joins_lists_and_bounds() {
        let upstream = Upstream::new(0, serde_json::json!({"results": []}));
        let (base_url, server) = serve(upstream.clone()).await;

        let query = GameQuery {
            page_size: 10,
            title: Some("souls".to_string()),
            platform_ids: vec![187, 4],
            store_ids: vec![1],
            genres: vec!["action".to_string(), "indie".to_string()],
            metacritic_lower_bound: Some(80),
            release_date_lower_bound: Some("2020-01-01".to_string()),
            ordering: Some("-metacritic".to_string()),
            ..GameQuery::default()
        };
        client_for(&base_url).search_filtered(query).await;

        let sent = upstream.last_query.lock().unwrap().clone().expect("query");
        assert!(sent.contains("search=souls"));
        assert!(sent.contains("platforms=187%2C4"));
        assert!(sent.contains("stores=1"));
        assert!(sent.contains("genres=action%2Cindie"));
        assert!(sent.contains("metacritic=80%2C100"));
        assert!(sent.contains("dates=2020-01-01%2C3000-01-01"));
        assert!(sent.contains("ordering=-metacritic"));
        server.abort();
    }
}
