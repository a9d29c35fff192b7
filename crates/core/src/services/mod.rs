pub mod market_service;
pub mod watchlist_service;
