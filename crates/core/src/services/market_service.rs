use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::errors::CoreError;
use crate::models::market::{MarketQuery, MarketSnapshot};
use crate::providers::traits::MarketDataProvider;

/// How long a successful upstream response is served before re-querying.
pub const REFRESH_INTERVAL_SECS: i64 = 60;

/// In-memory cache slot. Only replaced on a successful fetch.
#[derive(Debug, Default)]
struct MarketCache {
    snapshot: Option<Arc<MarketSnapshot>>,
}

impl MarketCache {
    fn fresh_at(&self, now: DateTime<Utc>) -> Option<Arc<MarketSnapshot>> {
        let snapshot = self.snapshot.as_ref()?;
        if now - snapshot.fetched_at < Duration::seconds(REFRESH_INTERVAL_SECS) {
            Some(Arc::clone(snapshot))
        } else {
            None
        }
    }
}

/// Proxies the upstream market-data API behind a single shared cache.
///
/// Cache strategy:
/// - **Fresh** (younger than [`REFRESH_INTERVAL_SECS`]): served from memory, no upstream call.
/// - **Stale or empty**: one upstream call; success replaces the snapshot.
/// - **Upstream failure**: the error is returned to this caller and the previous
///   snapshot, if any, is kept untouched for later requests.
///
/// The cache lock is held across the upstream call, so requests arriving while a
/// refresh is in flight wait for it and are then served from the new snapshot.
pub struct MarketService {
    provider: Box<dyn MarketDataProvider>,
    query: MarketQuery,
    cache: Mutex<MarketCache>,
}

impl MarketService {
    pub fn new(provider: Box<dyn MarketDataProvider>) -> Self {
        Self::with_query(provider, MarketQuery::default())
    }

    pub fn with_query(provider: Box<dyn MarketDataProvider>, query: MarketQuery) -> Self {
        Self {
            provider,
            query,
            cache: Mutex::new(MarketCache::default()),
        }
    }

    pub fn query(&self) -> &MarketQuery {
        &self.query
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Get market data, refreshing from upstream at most once per interval.
    pub async fn get_market_data(&self) -> Result<Arc<MarketSnapshot>, CoreError> {
        self.get_market_data_at(Utc::now()).await
    }

    /// Same as [`get_market_data`](Self::get_market_data) with an explicit clock reading.
    pub async fn get_market_data_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Arc<MarketSnapshot>, CoreError> {
        let mut cache = self.cache.lock().await;

        if let Some(snapshot) = cache.fresh_at(now) {
            debug!(age_secs = (now - snapshot.fetched_at).num_seconds(), "market cache hit");
            return Ok(snapshot);
        }

        debug!(provider = self.provider.name(), "market cache miss, querying upstream");
        match self.provider.fetch_markets(&self.query).await {
            Ok(coins) => {
                let snapshot = Arc::new(MarketSnapshot::new(coins, now));
                info!(coins = snapshot.len(), "market snapshot refreshed");
                cache.snapshot = Some(Arc::clone(&snapshot));
                Ok(snapshot)
            }
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    error = %e,
                    has_previous = cache.snapshot.is_some(),
                    "market refresh failed, keeping previous snapshot"
                );
                Err(e)
            }
        }
    }

    /// The last successful snapshot regardless of age, without touching upstream.
    pub async fn cached(&self) -> Option<Arc<MarketSnapshot>> {
        self.cache.lock().await.snapshot.clone()
    }
}
