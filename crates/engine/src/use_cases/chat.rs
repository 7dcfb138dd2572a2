//! Chat turn orchestration: the model-call / tool-dispatch loop.
//!
//! One `execute` call owns one conversation turn. The conversation state is
//! append-only: the persona seed, prior history, the new user message, then
//! alternating assistant tool-call messages and their results until the
//! model produces a plain answer.

use std::sync::Arc;

use futures_util::future::join_all;

use crate::infrastructure::ports::{
    ChatMessage, FinishReason, LlmError, LlmPort, LlmRequest,
};
use crate::prompt_templates::{PERSONA_REMINDER, SYSTEM_PROMPT};
use crate::use_cases::tools::GameToolRegistry;

/// Upper bound on tool rounds per turn. Normal queries resolve in one or
/// two rounds; past the bound the model answers without tools so the turn
/// always terminates in prose.
const MAX_TOOL_ROUNDS: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("LLM failure: {0}")]
    Llm(#[from] LlmError),
}

/// Container for chat use cases.
pub struct ChatUseCases {
    pub run: Arc<RunChatTurn>,
}

impl ChatUseCases {
    pub fn new(run: Arc<RunChatTurn>) -> Self {
        Self { run }
    }
}

/// Drives one conversational turn against the model.
pub struct RunChatTurn {
    llm: Arc<dyn LlmPort>,
    tools: Arc<GameToolRegistry>,
}

impl RunChatTurn {
    pub fn new(llm: Arc<dyn LlmPort>, tools: Arc<GameToolRegistry>) -> Self {
        Self { llm, tools }
    }

    /// Run the loop to completion and return the model's final answer.
    ///
    /// The only hard failure is an LLM error that survives the resilient
    /// wrapper's retries; every tool-side fault is folded into the
    /// conversation as a failure envelope instead.
    pub async fn execute(
        &self,
        message: &str,
        history: Vec<ChatMessage>,
    ) -> Result<String, ChatError> {
        let mut messages = history;
        messages.push(ChatMessage::user(format!("{message}\n\n{PERSONA_REMINDER}")));

        for round in 0..MAX_TOOL_ROUNDS {
            let request =
                LlmRequest::new(messages.clone()).with_system_prompt(SYSTEM_PROMPT);
            let response = self
                .llm
                .generate_with_tools(request, self.tools.definitions())
                .await?;

            if response.finish_reason != FinishReason::ToolCalls
                || response.tool_calls.is_empty()
            {
                return Ok(response.content);
            }

            tracing::debug!(
                round,
                calls = response.tool_calls.len(),
                "Model requested tool execution"
            );

            // The model's next turn depends on seeing its own prior call,
            // so its tool-call message is replayed verbatim before the
            // results.
            messages.push(ChatMessage::assistant_with_tools(
                response.content.clone(),
                response.tool_calls.clone(),
            ));

            // Calls within a round are independent: dispatch concurrently,
            // reassemble in request order.
            let dispatches = response.tool_calls.iter().map(|call| {
                let tools = Arc::clone(&self.tools);
                async move {
                    let envelope = tools.dispatch(&call.name, call.arguments.clone()).await;
                    (call.id.clone(), envelope)
                }
            });

            for (call_id, envelope) in join_all(dispatches).await {
                let content = serde_json::to_string(&envelope).unwrap_or_else(|e| {
                    tracing::error!(error = %e, "Tool envelope failed to serialize");
                    r#"{"success":false,"failure_reason":"Parsing error: unserializable tool result."}"#.to_string()
                });
                messages.push(ChatMessage::tool(call_id, content));
            }
        }

        // Round budget exhausted: answer from what has been gathered, with
        // no tools on offer, so the turn cannot loop forever.
        tracing::warn!(
            max_rounds = MAX_TOOL_ROUNDS,
            "Tool round budget exhausted, forcing a plain completion"
        );
        let request = LlmRequest::new(messages).with_system_prompt(SYSTEM_PROMPT);
        let response = self.llm.generate(request).await?;
        Ok(response.content)
    }
}
