use std::time::Duration;

/// §4.2 exponential backoff: `initial_delay * 2^attempt`, capped at
/// `max_delay`, up to `max_attempts` total tries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryConfig {
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let scaled = self.initial_delay.saturating_mul(1u32 << attempt.min(16));
        scaled.min(self.max_delay)
    }

    /// `delay_for_attempt` plus up to 20% random jitter, so that many
    /// adapters backing off at once don't all retry in lockstep.
    fn jittered_delay_for_attempt(&self, attempt: u32) -> Duration {
        use rand::Rng;
        let base = self.delay_for_attempt(attempt);
        let jitter_fraction = rand::thread_rng().gen_range(0.0..0.2);
        base + base.mul_f64(jitter_fraction)
    }
}

/// Runs `operation` up to `config.max_attempts` times, sleeping with
/// exponential backoff between attempts. Stops retrying as soon as
/// `is_retryable` reports `false` for the latest error.
pub async fn retry_with_backoff<T, E, F, Fut>(
    config: &RetryConfig,
    is_retryable: impl Fn(&E) -> bool,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if attempt >= config.max_attempts || !is_retryable(&err) {
                    return Err(err);
                }
                tokio::time::sleep(config.jittered_delay_for_attempt(attempt - 1)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn backoff_grows_exponentially_and_caps() {
        let config = RetryConfig {
            max_attempts: 5,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        };
        assert_eq!(config.delay_for_attempt(0), Duration::from_secs(1));
        assert_eq!(config.delay_for_attempt(1), Duration::from_secs(2));
        assert_eq!(config.delay_for_attempt(2), Duration::from_secs(4));
        assert_eq!(config.delay_for_attempt(10), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn stops_retrying_once_successful() {
        let attempts = AtomicU32::new(0);
        let config = RetryConfig {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
        };
        let result: Result<u32, &str> = retry_with_backoff(&config, |_| true, || async {
            let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 2 {
                Err("transient")
            } else {
                Ok(n)
            }
        })
        .await;
        assert_eq!(result, Ok(2));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gives_up_when_error_is_not_retryable() {
        let attempts = AtomicU32::new(0);
        let config = RetryConfig::default();
        let result: Result<u32, &str> = retry_with_backoff(&config, |_| false, || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err("fatal")
        })
        .await;
        assert_eq!(result, Err("fatal"));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausts_max_attempts() {
        let attempts = AtomicU32::new(0);
        let config = RetryConfig {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
        };
        let result: Result<u32, &str> = retry_with_backoff(&config, |_| true, || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err("persistent")
        })
        .await;
        assert_eq!(result, Err("persistent"));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }
}
