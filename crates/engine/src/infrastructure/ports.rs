//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is
//! concrete types. Ports exist for:
//! - LLM calls (could swap Ollama -> Claude/OpenAI)
//! - Catalogue lookups (could swap RAWG -> another game database)
//! - Clock (for testing)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nerdbot_domain::ResultEnvelope;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

// =============================================================================
// LLM Port
// =============================================================================

/// LLM request type
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// The conversation history
    pub messages: Vec<ChatMessage>,
    /// System prompt / persona
    pub system_prompt: Option<String>,
    /// Temperature for response generation (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            system_prompt: None,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// A message in the conversation.
///
/// Assistant messages keep the tool calls the model issued so the loop can
/// replay the model's own tool-call message verbatim; the model's next turn
/// depends on seeing its prior call. Tool messages carry the id of the call
/// they answer.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::plain(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::plain(MessageRole::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::plain(MessageRole::System, content)
    }

    /// The assistant message of a round that requested tool execution.
    pub fn assistant_with_tools(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            tool_calls,
            tool_call_id: None,
        }
    }

    /// A tool result answering the call identified by `call_id`.
    pub fn tool(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Tool,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: Some(call_id.into()),
        }
    }

    fn plain(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
    System,
    Tool,
}

/// Response from the LLM
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// The generated text content
    pub content: String,
    /// Tool calls requested by the model
    pub tool_calls: Vec<ToolCall>,
    /// Finish reason
    pub finish_reason: FinishReason,
    /// Token usage
    pub usage: Option<TokenUsage>,
}

/// Definition of a tool the LLM can call
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A tool call requested by the LLM
#[derive(Debug, Clone)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

/// Reason the generation finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    Unknown,
}

/// Token usage information
#[derive(Debug, Clone)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmPort: Send + Sync {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;
    async fn generate_with_tools(
        &self,
        request: LlmRequest,
        tools: Vec<ToolDefinition>,
    ) -> Result<LlmResponse, LlmError>;
}

// =============================================================================
// Catalogue Port
// =============================================================================

/// Filter set for a multi-game catalogue search.
///
/// Unset bounds mean "no constraint": the client widens them to the full
/// legal span before the provider sees them, so an absent filter never
/// causes a provider-side error.
#[derive(Debug, Clone)]
pub struct GameQuery {
    pub page_size: u8,
    pub title: Option<String>,
    pub parent_platform_ids: Vec<i64>,
    pub platform_ids: Vec<i64>,
    pub store_ids: Vec<i64>,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    /// Games released on or after this date (YYYY-MM-DD).
    pub release_date_lower_bound: Option<String>,
    /// Games released on or before this date (YYYY-MM-DD).
    pub release_date_upper_bound: Option<String>,
    pub metacritic_lower_bound: Option<i64>,
    pub metacritic_upper_bound: Option<i64>,
    pub ordering: Option<String>,
}

impl Default for GameQuery {
    fn default() -> Self {
        Self {
            page_size: 5,
            title: None,
            parent_platform_ids: Vec::new(),
            platform_ids: Vec::new(),
            store_ids: Vec::new(),
            developers: Vec::new(),
            publishers: Vec::new(),
            genres: Vec::new(),
            tags: Vec::new(),
            release_date_lower_bound: None,
            release_date_upper_bound: None,
            metacritic_lower_bound: None,
            metacritic_upper_bound: None,
            ordering: None,
        }
    }
}

/// Game-catalogue lookups. Every method resolves to a [`ResultEnvelope`]:
/// transport failures surface as failure envelopes after retries, never as
/// `Err`, so handlers have a single shape to classify.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CataloguePort: Send + Sync {
    /// Fetch a single game's detail payload by RAWG id.
    async fn game_details(&self, game_id: i64) -> ResultEnvelope;

    /// Search the catalogue for games matching a name.
    async fn search_by_name(&self, game_name: &str) -> ResultEnvelope;

    /// Search the catalogue with a full filter set.
    async fn search_filtered(&self, query: GameQuery) -> ResultEnvelope;
}

// =============================================================================
// Testability Ports
// =============================================================================

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
