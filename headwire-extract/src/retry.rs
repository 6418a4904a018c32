//! Bounded retry with exponential backoff around one record's extraction.

use crate::{ExtractError, TitleOutcome};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Runs extraction attempts until one yields an outcome or the attempt
/// budget is spent.
///
/// Transient errors are retried; a successful fetch that found no title is
/// a final outcome and is returned as-is. Nothing propagates past this
/// boundary — after the last failed attempt the result is
/// [`TitleOutcome::NotFound`], so one failing record can never abort its
/// batch.
#[derive(Debug, Clone, Copy)]
pub struct Retrier {
    max_attempts: u32,
    backoff_base: Duration,
}

impl Retrier {
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base,
        }
    }

    /// Drive `attempt` (called with the 0-based attempt number) to a final
    /// outcome. The delay after failed attempt `k` is `backoff_base * 2^k`;
    /// no delay follows the last attempt.
    pub async fn run<F, Fut>(&self, mut attempt: F) -> TitleOutcome
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<TitleOutcome, ExtractError>>,
    {
        for n in 0..self.max_attempts {
            match attempt(n).await {
                Ok(outcome) => return outcome,
                Err(err) => {
                    tracing::warn!(
                        target: "extract.retry",
                        attempt = n + 1,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "extract.attempt_failed"
                    );
                    if n + 1 < self.max_attempts {
                        sleep(self.delay_after(n)).await;
                    }
                }
            }
        }
        TitleOutcome::NotFound
    }

    fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff_base * 2u32.saturating_pow(attempt)
    }
}
