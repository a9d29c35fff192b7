use tracing::{debug, info};

use crate::errors::CoreError;
use crate::models::watchlist::{NewWatchlistItem, WatchlistItem};
use crate::storage::manager::WatchlistStore;

/// CRUD over the watchlist sequence of the persisted document.
pub struct WatchlistService {
    store: WatchlistStore,
}

impl WatchlistService {
    pub fn new(store: WatchlistStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &WatchlistStore {
        &self.store
    }

    /// Current watchlist in stored order.
    pub async fn list(&self) -> Vec<WatchlistItem> {
        self.store.load().await.watchlist
    }

    /// Validate `item` and append it unless its id is already present.
    ///
    /// Invalid input is rejected before storage is touched. A duplicate is not
    /// an error: the unchanged list is returned.
    pub async fn add(&self, item: NewWatchlistItem) -> Result<Vec<WatchlistItem>, CoreError> {
        let item = item.validate()?;
        let id = item.id.clone();

        let (document, inserted) = self.store.update(|doc| doc.insert(item)).await?;
        if inserted {
            info!(id = %id, "added to watchlist");
        } else {
            debug!(id = %id, "already on watchlist");
        }

        Ok(document.watchlist)
    }

    /// Remove every entry with this id. Removing an absent id is a no-op.
    pub async fn remove(&self, id: &str) -> Result<Vec<WatchlistItem>, CoreError> {
        let (document, removed) = self.store.update(|doc| doc.remove(id)).await?;
        if removed > 0 {
            info!(id = %id, removed, "removed from watchlist");
        } else {
            debug!(id = %id, "not on watchlist, nothing removed");
        }

        Ok(document.watchlist)
    }
}
