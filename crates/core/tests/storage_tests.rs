// ═══════════════════════════════════════════════════════════════════
// Storage Tests — document format, WatchlistStore load/persist/update
// ═══════════════════════════════════════════════════════════════════

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use crypto_dashboard_core::errors::CoreError;
use crypto_dashboard_core::models::watchlist::{WatchlistDocument, WatchlistItem};
use crypto_dashboard_core::storage::format;
use crypto_dashboard_core::storage::manager::WatchlistStore;

fn store_in(dir: &TempDir) -> WatchlistStore {
    WatchlistStore::new(dir.path().join("data.json"))
}

fn btc() -> WatchlistItem {
    WatchlistItem::new("bitcoin", "btc", "Bitcoin")
}

// ═══════════════════════════════════════════════════════════════════
// File format
// ═══════════════════════════════════════════════════════════════════

mod file_format {
    use super::*;

    #[test]
    fn encode_uses_two_space_indent() {
        let mut doc = WatchlistDocument::new();
        doc.insert(btc());
        let text = format::encode(&doc).unwrap();
        assert!(text.starts_with("{\n  \"watchlist\": ["));
        assert!(text.contains("\"portfolio\": []"));
    }

    #[test]
    fn decode_rejects_non_object() {
        let err = format::decode("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(format::decode("not json at all").is_err());
        assert!(format::decode("").is_err());
    }

    #[test]
    fn decode_accepts_original_file_layout() {
        let text = r#"{
  "watchlist": [
    { "id": "bitcoin", "symbol": "btc", "name": "Bitcoin" }
  ],
  "portfolio": []
}"#;
        let doc = format::decode(text).unwrap();
        assert_eq!(doc.watchlist, vec![btc()]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Load — fail-soft
// ═══════════════════════════════════════════════════════════════════

mod load {
    use super::*;

    #[tokio::test]
    async fn missing_file_yields_empty_document() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load().await, WatchlistDocument::new());
        assert!(!store.path().exists(), "load must not create the file");
    }

    #[tokio::test]
    async fn corrupt_file_yields_empty_document() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ this is not json").unwrap();
        assert_eq!(store.load().await, WatchlistDocument::new());
    }

    #[tokio::test]
    async fn wrong_shape_yields_empty_document() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"watchlist": "oops"}"#).unwrap();
        assert_eq!(store.load().await, WatchlistDocument::new());
    }

    #[tokio::test]
    async fn unreadable_path_yields_empty_document() {
        // A directory where the file should be: read fails with something other than NotFound.
        let dir = TempDir::new().unwrap();
        let store = WatchlistStore::new(dir.path());
        assert_eq!(store.load().await, WatchlistDocument::new());
    }

    #[tokio::test]
    async fn existing_file_is_read() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            json!({ "watchlist": [{ "id": "bitcoin", "symbol": "btc", "name": "Bitcoin" }], "portfolio": [] })
                .to_string(),
        )
        .unwrap();
        assert_eq!(store.load().await.watchlist, vec![btc()]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Persist / update
// ═══════════════════════════════════════════════════════════════════

mod persist {
    use super::*;

    #[tokio::test]
    async fn persist_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut doc = WatchlistDocument::new();
        doc.insert(btc());
        store.persist(&doc).await.unwrap();
        assert_eq!(store.load().await, doc);
    }

    #[tokio::test]
    async fn persist_overwrites_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "garbage").unwrap();
        store.persist(&WatchlistDocument::new()).await.unwrap();
        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(format::decode(&text).is_ok());
    }

    #[tokio::test]
    async fn persist_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = WatchlistStore::new(dir.path().join("no-such-dir").join("data.json"));
        let err = store.persist(&WatchlistDocument::new()).await.unwrap_err();
        assert!(matches!(err, CoreError::FileIO(_)));
    }

    #[tokio::test]
    async fn update_persists_even_without_change() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let (doc, _) = store.update(|_| ()).await.unwrap();
        assert_eq!(doc, WatchlistDocument::new());
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn update_returns_closure_outcome() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let (_, inserted) = store.update(|doc| doc.insert(btc())).await.unwrap();
        assert!(inserted);
        let (_, inserted) = store.update(|doc| doc.insert(btc())).await.unwrap();
        assert!(!inserted);
    }

    #[tokio::test]
    async fn update_preserves_portfolio() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            json!({ "watchlist": [], "portfolio": [{ "coin": "bitcoin" }] }).to_string(),
        )
        .unwrap();
        let (doc, _) = store.update(|doc| doc.insert(btc())).await.unwrap();
        assert_eq!(doc.portfolio, vec![json!({ "coin": "bitcoin" })]);
        assert_eq!(store.load().await.portfolio, vec![json!({ "coin": "bitcoin" })]);
    }

    #[tokio::test]
    async fn concurrent_updates_do_not_lose_writes() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(store_in(&dir));

        let mut handles = Vec::new();
        for n in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let item = WatchlistItem::new(format!("coin-{n}"), format!("c{n}"), format!("Coin {n}"));
                store.update(|doc| doc.insert(item)).await.unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        assert_eq!(store.load().await.watchlist.len(), 20);
    }
}
