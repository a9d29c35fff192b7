use std::net::SocketAddr;
use std::path::PathBuf;

use crypto_dashboard_core::providers::coingecko;
use crypto_dashboard_core::storage::format::DEFAULT_FILE_NAME;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Server settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Location of the watchlist document.
    pub data_path: PathBuf,
    /// Built UI bundle served for non-API routes, if the directory exists.
    pub static_dir: Option<PathBuf>,
    pub market_api_url: String,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_path: PathBuf::from(DEFAULT_FILE_NAME),
            static_dir: Some(PathBuf::from("dist")),
            market_api_url: coingecko::DEFAULT_BASE_URL.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // dotenvy loads .env, but doesn't override already-set env vars
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset or empty variables fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: "PORT",
                message: format!("{raw:?} is not a valid port ({e})"),
            })?,
            None => defaults.port,
        };

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            data_path: get("DATA_PATH").map(PathBuf::from).unwrap_or(defaults.data_path),
            static_dir: get("STATIC_DIR").map(PathBuf::from).or(defaults.static_dir),
            market_api_url: get("MARKET_API_URL").unwrap_or(defaults.market_api_url),
            log_level: get("RUST_LOG").unwrap_or(defaults.log_level),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid {
                var: "HOST",
                message: format!("{:?} is not a valid listen address ({e})", self.host),
            })
    }
}
