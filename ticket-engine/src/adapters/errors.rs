use thiserror::Error;

/// §7 error taxonomy for adapter calls. Each variant carries enough context
/// for the resilience envelope's classifier and the scheduler's
/// failure-isolation barrier to decide what to do without string matching.
#[derive(Debug, Error, Clone)]
pub enum AdapterError {
    #[error("credentials invalid for adapter {platform}")]
    AuthFailed { platform: String },
    #[error("rate limited by {platform}")]
    RateLimited { platform: String },
    #[error("circuit open for {platform}")]
    CircuitOpen { platform: String },
    #[error("timed out calling {platform} after {elapsed_ms}ms")]
    Timeout { platform: String, elapsed_ms: u64 },
    #[error("bulkhead full for {platform}")]
    BulkheadFull { platform: String },
    #[error("server error from {platform}: {status}")]
    ServerError { platform: String, status: u16 },
    #[error("not found on {platform}")]
    NotFound { platform: String },
    #[error("network error calling {platform}: {message}")]
    NetworkError { platform: String, message: String },
    #[error("validation error from {platform}: {message}")]
    ValidationError { platform: String, message: String },
}

/// Outcome of classifying an `AdapterError` for retry/circuit-breaker
/// purposes (§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    CircuitOpen,
    Timeout,
    BulkheadFull,
    ApiError,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct ClassifiedError {
    pub category: ErrorCategory,
    pub retryable: bool,
    pub message: String,
}

impl AdapterError {
    pub fn platform(&self) -> &str {
        match self {
            AdapterError::AuthFailed { platform }
            | AdapterError::RateLimited { platform }
            | AdapterError::CircuitOpen { platform }
            | AdapterError::Timeout { platform, .. }
            | AdapterError::BulkheadFull { platform }
            | AdapterError::ServerError { platform, .. }
            | AdapterError::NotFound { platform }
            | AdapterError::NetworkError { platform, .. }
            | AdapterError::ValidationError { platform, .. } => platform,
        }
    }

    /// §4.2 error classifier: `{category, retryable, message}`.
    pub fn classify(&self) -> ClassifiedError {
        let (category, retryable) = match self {
            AdapterError::AuthFailed { .. } => (ErrorCategory::ApiError, false),
            AdapterError::RateLimited { .. } => (ErrorCategory::ApiError, true),
            AdapterError::CircuitOpen { .. } => (ErrorCategory::CircuitOpen, false),
            AdapterError::Timeout { .. } => (ErrorCategory::Timeout, true),
            AdapterError::BulkheadFull { .. } => (ErrorCategory::BulkheadFull, false),
            AdapterError::ServerError { .. } => (ErrorCategory::ApiError, true),
            AdapterError::NotFound { .. } => (ErrorCategory::ApiError, false),
            AdapterError::NetworkError { .. } => (ErrorCategory::Unknown, true),
            AdapterError::ValidationError { .. } => (ErrorCategory::ApiError, false),
        };
        ClassifiedError {
            category,
            retryable,
            message: self.to_string(),
        }
    }

    /// Whether this error should be counted by the circuit breaker. Circuit
    /// and bulkhead rejections are the envelope's own bookkeeping, not a
    /// signal of adapter health, and are excluded (§4.2).
    pub fn should_count_as_failure(&self) -> bool {
        !matches!(
            self,
            AdapterError::CircuitOpen { .. } | AdapterError::BulkheadFull { .. }
        )
    }

    /// §4.3: unrecoverable for the adapter's lifetime — scheduler disables it.
    pub fn is_fatal_for_adapter(&self) -> bool {
        matches!(self, AdapterError::AuthFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circuit_open_is_not_counted_as_a_failure() {
        let err = AdapterError::CircuitOpen { platform: "ticketmaster".into() };
        assert!(!err.should_count_as_failure());
    }

    #[test]
    fn timeout_is_retryable() {
        let err = AdapterError::Timeout { platform: "stubhub".into(), elapsed_ms: 10_000 };
        assert!(err.classify().retryable);
    }

    #[test]
    fn auth_failed_is_fatal_and_not_retryable() {
        let err = AdapterError::AuthFailed { platform: "seatgeek".into() };
        assert!(err.is_fatal_for_adapter());
        assert!(!err.classify().retryable);
    }
}
