//! Use cases: chat orchestration and the tool surface behind it.

pub mod chat;
pub mod tools;

pub use chat::{ChatError, ChatUseCases, RunChatTurn};
pub use tools::GameToolRegistry;
