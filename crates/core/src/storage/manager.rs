use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::watchlist::WatchlistDocument;

use super::format;

/// Owns the JSON document file. Nothing else reads or writes it.
///
/// Reads are fail-soft: a missing or corrupt file yields an empty document.
/// Writes overwrite the whole file. Mutations go through [`update`], which
/// holds a per-store lock across load → mutate → persist so concurrent
/// requests cannot overwrite each other's changes.
///
/// [`update`]: WatchlistStore::update
#[derive(Debug)]
pub struct WatchlistStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl WatchlistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current document. Never fails.
    ///
    /// An absent file is the normal first-run state. An unreadable or
    /// unparsable file is logged as a warning since the next write will
    /// replace its contents.
    pub async fn load(&self) -> WatchlistDocument {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no watchlist file yet, starting empty");
                return WatchlistDocument::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read watchlist file, treating as empty");
                return WatchlistDocument::new();
            }
        };

        match format::decode(&raw) {
            Ok(document) => document,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "watchlist file is corrupt, treating as empty; existing contents will be overwritten on next change"
                );
                WatchlistDocument::new()
            }
        }
    }

    /// Serialize `document` and overwrite the backing file.
    pub async fn persist(&self, document: &WatchlistDocument) -> Result<(), CoreError> {
        let encoded = format::encode(document)?;
        tokio::fs::write(&self.path, encoded).await?;
        Ok(())
    }

    /// Load, apply `mutate`, persist, and return the mutated document along
    /// with whatever `mutate` returned. The document is persisted even when
    /// `mutate` leaves it unchanged.
    pub async fn update<F, T>(&self, mutate: F) -> Result<(WatchlistDocument, T), CoreError>
    where
        F: FnOnce(&mut WatchlistDocument) -> T,
    {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await;
        let outcome = mutate(&mut document);
        self.persist(&document).await?;
        Ok((document, outcome))
    }
}
