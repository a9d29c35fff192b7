use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::market::MarketQuery;
use super::traits::MarketDataProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

const PROVIDER_NAME: &str = "CoinGecko";

/// CoinGecko API provider for cryptocurrency market data.
///
/// - **Free**: public endpoints need no API key, but are rate limited per IP.
/// - **Endpoint**: `/coins/markets?vs_currency=..&order=..&per_page=..&page=..&sparkline=..`
///
/// The body is an array of coin objects keyed by CoinGecko ids ("bitcoin",
/// "ethereum"), which is what watchlist item ids refer to.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the provider at a different API root (mirror, pro plan, test server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("crypto-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.base_url)
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch_markets(&self, query: &MarketQuery) -> Result<Vec<serde_json::Value>, CoreError> {
        let resp = self
            .client
            .get(self.markets_url())
            .query(&query.to_query_pairs())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = status
                .canonical_reason()
                .unwrap_or("upstream request failed")
                .to_string();
            return Err(CoreError::UpstreamStatus {
                status: status.as_u16(),
                message,
            });
        }

        let body: serde_json::Value = resp.json().await.map_err(|e| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("Failed to parse markets response: {e}"),
        })?;

        match body {
            serde_json::Value::Array(coins) => {
                debug!(count = coins.len(), "fetched coin markets");
                Ok(coins)
            }
            other => Err(CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!(
                    "Expected an array of coin markets, got {}",
                    json_kind(&other)
                ),
            }),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
