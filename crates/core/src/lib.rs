pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::path::PathBuf;
use std::sync::Arc;

use models::market::MarketSnapshot;
use models::watchlist::{NewWatchlistItem, WatchlistItem};
use providers::traits::MarketDataProvider;
use services::{market_service::MarketService, watchlist_service::WatchlistService};
use storage::manager::WatchlistStore;

use errors::CoreError;

/// Main entry point for the crypto dashboard core library.
/// Holds the watchlist store and the market-data proxy; share it behind an `Arc`.
#[must_use]
pub struct CryptoDashboard {
    watchlist_service: WatchlistService,
    market_service: MarketService,
}

impl std::fmt::Debug for CryptoDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoDashboard")
            .field("data_path", &self.watchlist_service.store().path())
            .field("market_provider", &self.market_service.provider_name())
            .finish()
    }
}

impl CryptoDashboard {
    /// Build a dashboard backed by the document at `data_path`, fetching
    /// market data through `provider`.
    pub fn new(data_path: impl Into<PathBuf>, provider: Box<dyn MarketDataProvider>) -> Self {
        Self {
            watchlist_service: WatchlistService::new(WatchlistStore::new(data_path)),
            market_service: MarketService::new(provider),
        }
    }

    /// Convenience for sharing across request handlers.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    // ── Watchlist ───────────────────────────────────────────────────

    pub async fn list_watchlist(&self) -> Vec<WatchlistItem> {
        self.watchlist_service.list().await
    }

    pub async fn add_to_watchlist(
        &self,
        item: NewWatchlistItem,
    ) -> Result<Vec<WatchlistItem>, CoreError> {
        self.watchlist_service.add(item).await
    }

    pub async fn remove_from_watchlist(&self, id: &str) -> Result<Vec<WatchlistItem>, CoreError> {
        self.watchlist_service.remove(id).await
    }

    // ── Market data ─────────────────────────────────────────────────

    pub async fn market_data(&self) -> Result<Arc<MarketSnapshot>, CoreError> {
        self.market_service.get_market_data().await
    }

    // ── Service access ──────────────────────────────────────────────

    pub fn watchlist_service(&self) -> &WatchlistService {
        &self.watchlist_service
    }

    pub fn market_service(&self) -> &MarketService {
        &self.market_service
    }
}
