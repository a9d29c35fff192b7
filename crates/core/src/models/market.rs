use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parameters sent to the upstream `coins/markets` endpoint.
///
/// The dashboard always asks for the same page, so one shared cached
/// response serves every client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketQuery {
    pub vs_currency: String,
    pub order: String,
    pub per_page: u32,
    pub page: u32,
    pub sparkline: bool,
}

impl Default for MarketQuery {
    fn default() -> Self {
        Self {
            vs_currency: "usd".to_string(),
            order: "market_cap_desc".to_string(),
            per_page: 10,
            page: 1,
            sparkline: true,
        }
    }
}

impl MarketQuery {
    /// Render as `(key, value)` pairs for the request query string.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("vs_currency", self.vs_currency.clone()),
            ("order", self.order.clone()),
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
            ("sparkline", self.sparkline.to_string()),
        ]
    }
}

/// The last successful upstream response, kept verbatim.
///
/// Entries are opaque coin-market objects (price, market cap, 7-day
/// sparkline, ...) passed through to the UI without reshaping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub coins: Vec<serde_json::Value>,
    pub fetched_at: DateTime<Utc>,
}

impl MarketSnapshot {
    pub fn new(coins: Vec<serde_json::Value>, fetched_at: DateTime<Utc>) -> Self {
        Self { coins, fetched_at }
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }
}
