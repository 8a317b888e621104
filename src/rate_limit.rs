use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, instrument, warn};

/// Slowest pace a limiter will run at, one request every ten seconds
pub const MIN_RATE: f64 = 0.1;
/// Fastest pace a limiter will run at
pub const MAX_RATE: f64 = 1_000.0;

/// Token bucket pacing requests to the NCBI E-utilities limits
///
/// NCBI allows 3 requests per second per IP without an API key and 10 with
/// one. Clones share the same bucket.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    bucket: Arc<Mutex<TokenBucket>>,
}

#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    capacity: f64,
    per_second: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// Create a limiter allowing `per_second` requests per second
    ///
    /// The bucket starts full and holds at least one token. Rates outside
    /// `MIN_RATE..=MAX_RATE`, and NaN, are clamped into that range.
    pub fn new(per_second: f64) -> Self {
        let per_second = clamp_rate(per_second);
        let capacity = per_second.max(1.0);
        Self {
            bucket: Arc::new(Mutex::new(TokenBucket {
                tokens: capacity,
                capacity,
                per_second,
                last_refill: Instant::now(),
            })),
        }
    }

    /// Wait until a request may be sent, then consume one token
    #[instrument(skip(self))]
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut bucket = self.bucket.lock().await;
                bucket.refill();

                if bucket.tokens >= 1.0 {
                    bucket.tokens -= 1.0;
                    debug!(remaining_tokens = bucket.tokens, "Request slot acquired");
                    return;
                }

                bucket.time_until_next_token()
            };

            debug!(wait_ms = wait.as_millis() as u64, "Pacing request");
            sleep(wait).await;
        }
    }

    /// Tokens currently available, after refilling
    pub async fn available(&self) -> f64 {
        let mut bucket = self.bucket.lock().await;
        bucket.refill();
        bucket.tokens
    }

    pub async fn rate(&self) -> f64 {
        self.bucket.lock().await.per_second
    }
}

fn clamp_rate(per_second: f64) -> f64 {
    let clamped = if per_second.is_nan() {
        MIN_RATE
    } else {
        per_second.clamp(MIN_RATE, MAX_RATE)
    };
    if clamped != per_second {
        warn!(requested = per_second, used = clamped, "Rate limit out of range, clamped");
    }
    clamped
}

impl TokenBucket {
    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.per_second).min(self.capacity);
        self.last_refill = now;
    }

    fn time_until_next_token(&self) -> Duration {
        let missing = (1.0 - self.tokens).max(0.0);
        Duration::from_secs_f64(missing / self.per_second)
    }
}
