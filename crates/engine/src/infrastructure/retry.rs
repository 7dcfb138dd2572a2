//! Shared retry policy: exponential backoff with jitter.
//!
//! Used by both outbound clients (RAWG catalogue, LLM) so transient
//! upstream failures are absorbed the same way everywhere.

use rand::Rng;
use std::time::Duration;

/// Jitter added to every backoff delay, drawn uniformly from [0, 100ms).
/// Spreads simultaneous retries so concurrent conversations do not hammer
/// a recovering upstream in lockstep.
const JITTER_MS: u64 = 100;

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempt budget (1 = no retries, just the initial attempt).
    pub max_attempts: u32,
    /// Base delay in milliseconds before the first retry.
    pub base_delay_ms: u64,
    /// Maximum delay in milliseconds (caps exponential growth).
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            max_delay_ms: 30_000,
        }
    }
}

impl RetryConfig {
    /// Delay to wait before attempt `attempt` (1-indexed).
    ///
    /// Attempt 1 never waits. Attempt k >= 2 waits
    /// `base_delay * 2^(k-2)`, capped at `max_delay_ms`, plus jitter.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }

        let exponential = self
            .base_delay_ms
            .saturating_mul(2u64.saturating_pow(attempt - 2));
        let capped = exponential.min(self.max_delay_ms);
        let jitter = rand::thread_rng().gen_range(0..JITTER_MS);

        Duration::from_millis(capped.saturating_add(jitter))
    }
}
