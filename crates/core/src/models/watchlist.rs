use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A coin the user is tracking.
///
/// `id` is the natural key and matches the upstream market API's coin
/// identifier (e.g. "bitcoin"), so the UI can join watchlist entries
/// against market rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistItem {
    pub id: String,
    pub symbol: String,
    pub name: String,
}

impl WatchlistItem {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

/// Unvalidated watchlist item as submitted by a client.
///
/// Every field is optional so that a partially filled body still parses and
/// can be rejected with a precise message instead of a generic decode error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewWatchlistItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl NewWatchlistItem {
    /// Check that `id`, `symbol` and `name` are all present and non-blank.
    /// Surrounding whitespace is stripped, so the stored id is the one that
    /// was checked for uniqueness. The error lists every offending field.
    pub fn validate(self) -> Result<WatchlistItem, CoreError> {
        let trimmed = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let (id, symbol, name) = (trimmed(self.id), trimmed(self.symbol), trimmed(self.name));

        let missing: Vec<&str> = [("id", id.is_none()), ("symbol", symbol.is_none()), ("name", name.is_none())]
            .into_iter()
            .filter_map(|(field, absent)| absent.then_some(field))
            .collect();

        match (id, symbol, name) {
            (Some(id), Some(symbol), Some(name)) => Ok(WatchlistItem { id, symbol, name }),
            _ => Err(CoreError::Validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            ))),
        }
    }
}

impl From<WatchlistItem> for NewWatchlistItem {
    fn from(item: WatchlistItem) -> Self {
        Self {
            id: Some(item.id),
            symbol: Some(item.symbol),
            name: Some(item.name),
        }
    }
}

/// The single persisted record. Every mutation rewrites the whole document.
///
/// `portfolio` is reserved: nothing reads or writes it, but whatever is on
/// disk is carried through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchlistDocument {
    #[serde(default)]
    pub watchlist: Vec<WatchlistItem>,

    #[serde(default)]
    pub portfolio: Vec<serde_json::Value>,
}

impl WatchlistDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.watchlist.iter().any(|i| i.id == id)
    }

    /// Append `item` unless an entry with the same id already exists.
    /// Returns whether the item was appended.
    pub fn insert(&mut self, item: WatchlistItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.watchlist.push(item);
        true
    }

    /// Drop every entry whose id equals `id`, keeping all others in order.
    /// Returns the number of entries removed.
    pub fn remove(&mut self, id: &str) -> usize {
        let before = self.watchlist.len();
        self.watchlist.retain(|i| i.id != id);
        before - self.watchlist.len()
    }
}
