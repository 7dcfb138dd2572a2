//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{CataloguePort, ClockPort, LlmPort};
use crate::use_cases::{ChatUseCases, GameToolRegistry, RunChatTurn};

/// Main application state.
///
/// Holds the use cases and the injected ports they are built from.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
    pub llm: Arc<dyn LlmPort>,
    pub catalogue: Arc<dyn CataloguePort>,
}

/// Container for all use cases.
pub struct UseCases {
    pub chat: ChatUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        catalogue: Arc<dyn CataloguePort>,
        llm: Arc<dyn LlmPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let tools = Arc::new(GameToolRegistry::new(catalogue.clone(), clock));
        let run = Arc::new(RunChatTurn::new(llm.clone(), tools));

        Self {
            use_cases: UseCases {
                chat: ChatUseCases::new(run),
            },
            llm,
            catalogue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::SystemClock;
    use crate::infrastructure::ports::{
        FinishReason, LlmResponse, MockCataloguePort, MockLlmPort,
    };

    #[tokio::test]
    async fn test_app_wires_chat_end_to_end() {
        let catalogue = MockCataloguePort::new();
        let mut llm = MockLlmPort::new();
        llm.expect_generate_with_tools().returning(|_, _| {
            Ok(LlmResponse {
                content: "Greetings, fellow gamer!".to_string(),
                tool_calls: vec![],
                finish_reason: FinishReason::Stop,
                usage: None,
            })
        });

        let app = App::new(
            Arc::new(catalogue),
            Arc::new(llm),
            Arc::new(SystemClock::new()),
        );

        let reply = app
            .use_cases
            .chat
            .run
            .execute("hello", vec![])
            .await
            .expect("reply");
        assert_eq!(reply, "Greetings, fellow gamer!");
    }
}
