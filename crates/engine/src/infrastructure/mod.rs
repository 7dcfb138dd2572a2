//! Infrastructure: port traits plus the concrete adapters behind them.

pub mod clock;
pub mod ollama;
pub mod ports;
pub mod rawg;
pub mod resilient_llm;
pub mod retry;
