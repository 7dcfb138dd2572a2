//! HTTP routes.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::app::App;
use crate::infrastructure::ports::ChatMessage;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/chat", post(chat))
}

async fn health() -> &'static str {
    "OK"
}

/// A chat turn as the UI collaborator sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurnDto {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurnDto>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

async fn chat(
    State(app): State<Arc<App>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let history = request
        .history
        .iter()
        .map(to_message)
        .collect::<Result<Vec<_>, ApiError>>()?;

    let reply = app
        .use_cases
        .chat
        .run
        .execute(&request.message, history)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(ChatResponse { reply }))
}

fn to_message(turn: &ChatTurnDto) -> Result<ChatMessage, ApiError> {
    match turn.role.as_str() {
        "user" => Ok(ChatMessage::user(turn.content.clone())),
        "assistant" => Ok(ChatMessage::assistant(turn.content.clone())),
        other => Err(ApiError::BadRequest(format!(
            "Unknown history role: {other}"
        ))),
    }
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::BadRequest(msg) => {
                (axum::http::StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::Internal(_) => (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error",
            )
                .into_response(),
        }
    }
}
