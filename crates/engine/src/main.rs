//! NerdBot Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nerdbot_engine::api;
use nerdbot_engine::app::App;
use nerdbot_engine::infrastructure::{
    clock::SystemClock,
    ollama::OllamaClient,
    rawg::{RawgClient, RawgConfig, DEFAULT_RAWG_BASE_URL},
    resilient_llm::ResilientLlmClient,
    retry::RetryConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine runs from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nerdbot_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting NerdBot Engine");

    // Load configuration
    let rawg_api_key = std::env::var("RAWG_API_KEY")
        .context("RAWG_API_KEY must be set (get one at https://rawg.io/apidocs)")?;
    let rawg_base_url =
        std::env::var("RAWG_BASE_URL").unwrap_or_else(|_| DEFAULT_RAWG_BASE_URL.into());
    let ollama_url = std::env::var("OLLAMA_URL")
        .or_else(|_| std::env::var("OLLAMA_BASE_URL"))
        .unwrap_or_else(|_| "http://localhost:11434".into());
    let ollama_model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".into());
    let server_host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let server_port: u16 = std::env::var("SERVER_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .unwrap_or(3000);

    // Create infrastructure clients
    let retry_config = RetryConfig::default();
    tracing::info!(
        "Outbound clients configured with retry: max_attempts={}, base_delay_ms={}",
        retry_config.max_attempts,
        retry_config.base_delay_ms
    );

    let catalogue = Arc::new(RawgClient::new(
        RawgConfig::new(rawg_api_key)
            .with_base_url(rawg_base_url)
            .with_retry(retry_config.clone()),
    ));

    let ollama_client = Arc::new(OllamaClient::new(&ollama_url, &ollama_model));
    let llm = Arc::new(ResilientLlmClient::new(ollama_client, retry_config));
    let clock = Arc::new(SystemClock::new());

    // Create application
    let app = Arc::new(App::new(catalogue, llm, clock));

    // Build router
    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{server_host}:{server_port}").parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let allowed_origins = allowed_origins?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
