use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::market::MarketQuery;

/// Trait abstraction for the upstream market-data API.
///
/// The proxy service only depends on this trait, so the HTTP client can be
/// swapped for a stub in tests or for another vendor without touching the
/// caching logic.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch one page of coin-market entries.
    ///
    /// Entries are returned as opaque JSON objects in upstream order.
    async fn fetch_markets(&self, query: &MarketQuery) -> Result<Vec<serde_json::Value>, CoreError>;
}
