use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

pub const DEFAULT_RETRIES: u32 = 2;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug)]
struct Entry<T> {
    value: T,
    fetched_at: Instant,
}

/// Single-slot cache with a time-to-live.
///
/// Readers are serialized on the slot, so concurrent misses collapse into one
/// in-flight fetch and the waiters see its result. Failed fetches are retried
/// `retries` more times and are never cached. When a refresh fails for good,
/// the expired value keeps being served; only a cache that never held a value
/// reports the error.
#[derive(Debug)]
pub struct TtlCache<T> {
    name: &'static str,
    ttl: Duration,
    retries: u32,
    retry_delay: Duration,
    slot: Mutex<Option<Entry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self {
            name,
            ttl,
            retries: DEFAULT_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            slot: Mutex::new(None),
        }
    }

    pub fn with_retries(mut self, retries: u32, retry_delay: Duration) -> Self {
        self.retries = retries;
        self.retry_delay = retry_delay;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get_or_fetch<F, Fut, E>(&self, mut fetch: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut slot = self.slot.lock().await;

        if let Some(entry) = slot.as_ref() {
            if entry.fetched_at.elapsed() < self.ttl {
                debug!(cache = self.name, "serving cached value");
                return Ok(entry.value.clone());
            }
        }

        let mut attempt = 0;
        loop {
            match fetch().await {
                Ok(value) => {
                    *slot = Some(Entry {
                        value: value.clone(),
                        fetched_at: Instant::now(),
                    });
                    return Ok(value);
                }
                Err(err) if attempt < self.retries => {
                    attempt += 1;
                    warn!(cache = self.name, attempt, error = %err, "fetch failed, retrying");
                    if !self.retry_delay.is_zero() {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
                Err(err) => {
                    return match slot.as_ref() {
                        Some(entry) => {
                            warn!(
                                cache = self.name,
                                error = %err,
                                "refresh failed, serving stale value"
                            );
                            Ok(entry.value.clone())
                        }
                        None => Err(err),
                    };
                }
            }
        }
    }

    /// Drop the cached value so the next read fetches again.
    pub async fn invalidate(&self) {
        self.slot.lock().await.take();
    }
}
