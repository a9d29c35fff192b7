use std::path::Path;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path as UrlPath, State};
use axum::response::Json;
use axum::routing::{delete, get};
use axum::Router;
use crypto_dashboard_core::models::watchlist::{NewWatchlistItem, WatchlistItem};
use crypto_dashboard_core::CryptoDashboard;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

pub type AppState = Arc<CryptoDashboard>;

#[derive(Debug, Deserialize)]
pub struct AddWatchlistRequest {
    #[serde(default)]
    pub item: Option<NewWatchlistItem>,
}

/// API routes only.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/watchlist", get(list_watchlist).post(add_to_watchlist))
        .route("/api/watchlist/:id", delete(remove_from_watchlist))
        .route("/api/market", get(get_market))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// API routes plus the built UI, if `static_dir` exists. Unknown paths fall
/// back to `index.html` so client-side routing works.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = api_router(state);
    match static_dir.filter(|dir| dir.is_dir()) {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "serving static UI");
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => router,
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_watchlist(State(state): State<AppState>) -> Json<Vec<WatchlistItem>> {
    Json(state.list_watchlist().await)
}

async fn add_to_watchlist(
    State(state): State<AppState>,
    body: Result<Json<AddWatchlistRequest>, JsonRejection>,
) -> Result<Json<Vec<WatchlistItem>>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let item = req
        .item
        .ok_or_else(|| ApiError::bad_request("request body must contain an `item` object"))?;
    let watchlist = state.add_to_watchlist(item).await?;
    Ok(Json(watchlist))
}

async fn remove_from_watchlist(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<Vec<WatchlistItem>>, ApiError> {
    let watchlist = state.remove_from_watchlist(&id).await?;
    Ok(Json(watchlist))
}

async fn get_market(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let snapshot = state.market_data().await?;
    Ok(Json(snapshot.coins.clone()))
}
