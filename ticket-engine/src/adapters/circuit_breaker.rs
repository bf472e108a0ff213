use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CircuitBreakerState {
    Closed,
    Open,
    HalfOpen,
}

/// §4.2: consecutive-failure breaker. `threshold` consecutive failures trip
/// it; it reopens for probing after `half_open_after`; a single success in
/// `HalfOpen` closes it, a single failure reopens it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitBreakerConfig {
    pub threshold: u32,
    pub half_open_after: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            threshold: 5,
            half_open_after: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitBreakerStats {
    pub state: CircuitBreakerState,
    pub consecutive_failures: u32,
}

struct CircuitBreakerData {
    state: CircuitBreakerState,
    consecutive_failures: u32,
    opened_at: Option<Instant>,
}

pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    data: Mutex<CircuitBreakerData>,
}

impl CircuitBreaker {
    pub fn new() -> Self {
        Self::with_config(CircuitBreakerConfig::default())
    }

    pub fn with_config(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            data: Mutex::new(CircuitBreakerData {
                state: CircuitBreakerState::Closed,
                consecutive_failures: 0,
                opened_at: None,
            }),
        }
    }

    /// Side-effecting: transitions `Open -> HalfOpen` once the cooldown has
    /// elapsed, then reports whether a call may proceed.
    pub fn is_call_allowed(&self) -> bool {
        let mut data = self.data.lock().unwrap();
        match data.state {
            CircuitBreakerState::Closed | CircuitBreakerState::HalfOpen => true,
            CircuitBreakerState::Open => {
                let elapsed = data.opened_at.map(|t| t.elapsed()).unwrap_or_default();
                if elapsed >= self.config.half_open_after {
                    data.state = CircuitBreakerState::HalfOpen;
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn record_success(&self) {
        let mut data = self.data.lock().unwrap();
        data.consecutive_failures = 0;
        data.state = CircuitBreakerState::Closed;
        data.opened_at = None;
    }

    pub fn record_failure(&self) {
        let mut data = self.data.lock().unwrap();
        match data.state {
            CircuitBreakerState::HalfOpen => {
                data.state = CircuitBreakerState::Open;
                data.opened_at = Some(Instant::now());
            }
            CircuitBreakerState::Closed => {
                data.consecutive_failures += 1;
                if data.consecutive_failures >= self.config.threshold {
                    data.state = CircuitBreakerState::Open;
                    data.opened_at = Some(Instant::now());
                }
            }
            CircuitBreakerState::Open => {}
        }
    }

    pub fn stats(&self) -> CircuitBreakerStats {
        let data = self.data.lock().unwrap();
        CircuitBreakerStats {
            state: data.state,
            consecutive_failures: data.consecutive_failures,
        }
    }

    pub fn force_open(&self) {
        let mut data = self.data.lock().unwrap();
        data.state = CircuitBreakerState::Open;
        data.opened_at = Some(Instant::now());
    }

    pub fn reset(&self) {
        let mut data = self.data.lock().unwrap();
        data.state = CircuitBreakerState::Closed;
        data.consecutive_failures = 0;
        data.opened_at = None;
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker() -> CircuitBreaker {
        CircuitBreaker::with_config(CircuitBreakerConfig {
            threshold: 3,
            half_open_after: Duration::from_millis(20),
        })
    }

    #[test]
    fn opens_after_threshold_consecutive_failures() {
        let cb = breaker();
        cb.record_failure();
        cb.record_failure();
        assert!(cb.is_call_allowed());
        cb.record_failure();
        assert_eq!(cb.stats().state, CircuitBreakerState::Open);
        assert!(!cb.is_call_allowed());
    }

    #[test]
    fn success_resets_consecutive_failure_count() {
        let cb = breaker();
        cb.record_failure();
        cb.record_failure();
        cb.record_success();
        assert_eq!(cb.stats().consecutive_failures, 0);
        cb.record_failure();
        cb.record_failure();
        assert_eq!(cb.stats().state, CircuitBreakerState::Closed);
    }

    #[test]
    fn half_open_failure_reopens_immediately() {
        let cb = breaker();
        cb.force_open();
        std::thread::sleep(Duration::from_millis(25));
        assert!(cb.is_call_allowed());
        assert_eq!(cb.stats().state, CircuitBreakerState::HalfOpen);
        cb.record_failure();
        assert_eq!(cb.stats().state, CircuitBreakerState::Open);
    }

    #[test]
    fn half_open_success_closes() {
        let cb = breaker();
        cb.force_open();
        std::thread::sleep(Duration::from_millis(25));
        assert!(cb.is_call_allowed());
        cb.record_success();
        assert_eq!(cb.stats().state, CircuitBreakerState::Closed);
    }
}
