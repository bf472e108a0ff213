use super::bulkhead::Bulkhead;
use super::circuit_breaker::CircuitBreaker;
use super::errors::AdapterError;
use super::retry::{retry_with_backoff, RetryConfig};
use std::future::Future;
use std::time::Duration;
use tracing::info;

/// §4.2: every outbound adapter call is wrapped `timeout -> retry ->
/// circuit breaker -> bulkhead`, outside-in from the caller's perspective.
/// The bulkhead gates entry and the breaker gates each attempt, but the
/// timeout wraps the whole retry loop so total wall time is bounded even
/// across several attempts, and the breaker's success/failure accounting
/// happens once per attempt rather than once per `run()` call.
pub struct ResilienceEnvelope {
    platform: String,
    timeout: Duration,
    retry: RetryConfig,
    breaker: CircuitBreaker,
    bulkhead: Bulkhead,
}

impl ResilienceEnvelope {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            timeout: Duration::from_secs(10),
            retry: RetryConfig::default(),
            breaker: CircuitBreaker::new(),
            bulkhead: Bulkhead::new(5, 10),
        }
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    /// Runs `operation` through the full envelope. `operation` is called
    /// once per retry attempt and must be cheap to construct repeatedly.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, AdapterError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AdapterError>>,
    {
        let _permit = self.bulkhead.acquire().await.ok_or_else(|| AdapterError::BulkheadFull {
            platform: self.platform.clone(),
        })?;

        if !self.breaker.is_call_allowed() {
            return Err(AdapterError::CircuitOpen {
                platform: self.platform.clone(),
            });
        }

        let breaker = &self.breaker;
        let platform = self.platform.clone();
        let retry_fut = retry_with_backoff(
            &self.retry,
            |err: &AdapterError| err.classify().retryable,
            move || {
                let fut = operation();
                let platform = platform.clone();
                async move {
                    let result = fut.await;

                    let state_before = breaker.stats().state;
                    match &result {
                        Ok(_) => breaker.record_success(),
                        Err(err) if err.should_count_as_failure() => breaker.record_failure(),
                        Err(_) => {}
                    }
                    let state_after = breaker.stats().state;
                    if state_after != state_before {
                        info!(
                            platform = %platform,
                            from = ?state_before,
                            to = ?state_after,
                            "circuit breaker state transition"
                        );
                    }

                    result
                }
            },
        );

        match tokio::time::timeout(self.timeout, retry_fut).await {
            Ok(result) => result,
            Err(_) => Err(AdapterError::Timeout {
                platform: self.platform.clone(),
                elapsed_ms: self.timeout.as_millis() as u64,
            }),
        }
    }
}
