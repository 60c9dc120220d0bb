use crate::core::QuoteSource;
use crate::domain::model::QuoteSnapshot;
use crate::utils::error::UpstreamError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

struct Cached {
    snapshot: Arc<QuoteSnapshot>,
    stored_at: Instant,
}

/// Time-bounded cache in front of a [`QuoteSource`].
///
/// Every caller shares the stored snapshot while it is younger than the TTL.
/// Once expired, the next caller refreshes it while holding the lock, so
/// callers racing past the TTL wait for that single fetch instead of issuing
/// their own. A failed refresh is reported to the caller and keeps the previous
/// snapshot in place; it is never served once expired.
pub struct QuoteCache<S: QuoteSource> {
    source: S,
    ttl: Duration,
    state: Mutex<Option<Cached>>,
}

impl<S: QuoteSource> QuoteCache<S> {
    pub fn with_ttl(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            state: Mutex::new(None),
        }
    }

    pub async fn get(&self) -> Result<Arc<QuoteSnapshot>, UpstreamError> {
        let mut state = self.state.lock().await;

        if let Some(cached) = state.as_ref() {
            if cached.stored_at.elapsed() <= self.ttl {
                tracing::debug!(
                    "Serving cached quotes captured at {}",
                    cached.snapshot.captured_at
                );
                return Ok(Arc::clone(&cached.snapshot));
            }
        }

        tracing::info!("Refreshing currency quotes");
        match self.source.fetch().await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                tracing::info!(
                    "Stored {} quotes against {}",
                    snapshot.rates.len(),
                    snapshot.base
                );
                *state = Some(Cached {
                    snapshot: Arc::clone(&snapshot),
                    stored_at: Instant::now(),
                });
                Ok(snapshot)
            }
            Err(e) => {
                tracing::error!("Currency quote refresh failed: {}", e);
                Err(e)
            }
        }
    }
}
