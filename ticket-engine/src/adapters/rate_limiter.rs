use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// §4.1 per-platform rate limiter: a token bucket with continuous refill.
/// Tokens accrue at `tokens_per_interval / interval` and saturate at
/// `max_tokens` (the burst allowance). `try_acquire` is non-blocking;
/// `acquire` cooperatively waits for a token to become available — it's a
/// suspension point (§5), not a spin loop.
pub struct RateLimiter {
    tokens_per_interval: f64,
    interval: Duration,
    max_tokens: f64,
    state: Mutex<BucketState>,
}

struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    pub fn new(tokens_per_interval: u32, interval: Duration, max_tokens: u32) -> Self {
        Self {
            tokens_per_interval: tokens_per_interval as f64,
            interval,
            max_tokens: max_tokens as f64,
            state: Mutex::new(BucketState {
                tokens: max_tokens as f64,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Convenience constructor for a "N requests per day" quota (§4.1, §6),
    /// smoothed into per-minute buckets rather than letting the full daily
    /// quota burst in a single instant. Burst is `min(5 * per-minute, 50)`.
    pub fn per_day(max_calls: u32) -> Self {
        let per_minute = (max_calls as f64 / 1440.0).max(1.0 / 1440.0);
        let burst = (per_minute * 5.0).min(50.0).max(1.0);
        Self {
            tokens_per_interval: per_minute,
            interval: Duration::from_secs(60),
            max_tokens: burst,
            state: Mutex::new(BucketState {
                tokens: burst,
                last_refill: Instant::now(),
            }),
        }
    }

    fn refill(&self, state: &mut BucketState, now: Instant) {
        let elapsed = now.duration_since(state.last_refill);
        let refilled = elapsed.as_secs_f64() / self.interval.as_secs_f64() * self.tokens_per_interval;
        state.tokens = (state.tokens + refilled).min(self.max_tokens);
        state.last_refill = now;
    }

    /// Attempts to take one token. Returns `true` and deducts the token if
    /// the bucket has at least one available, `false` otherwise.
    pub fn try_acquire(&self) -> bool {
        let now = Instant::now();
        let mut state = self.state.lock().unwrap();
        self.refill(&mut state, now);
        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// How long until a token is available, or `Duration::ZERO` if one
    /// already is.
    pub fn time_until_available(&self) -> Duration {
        let now = Instant::now();
        let mut state = self.state.lock().unwrap();
        self.refill(&mut state, now);
        if state.tokens >= 1.0 {
            return Duration::ZERO;
        }
        let deficit = 1.0 - state.tokens;
        let seconds = deficit / self.tokens_per_interval * self.interval.as_secs_f64();
        Duration::from_secs_f64(seconds.max(0.0))
    }

    /// Cooperatively waits until a token is available, then takes it. A
    /// suspension point in the adapter call path (§5) — callers on the same
    /// runtime keep making progress while this waits.
    pub async fn acquire(&self) {
        loop {
            if self.try_acquire() {
                return;
            }
            let wait = self.time_until_available();
            if wait > Duration::ZERO {
                sleep(wait).await;
            }
        }
    }

    pub fn remaining(&self) -> u32 {
        let now = Instant::now();
        let mut state = self.state.lock().unwrap();
        self.refill(&mut state, now);
        state.tokens.floor() as u32
    }
}
