use anyhow::{Context, Result};
use crypto_dashboard_core::providers::coingecko::CoinGeckoProvider;
use crypto_dashboard_core::CryptoDashboard;
use crypto_dashboard_server::{create_router, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.log_level);

    info!("crypto-dashboard-server starting");

    let provider = CoinGeckoProvider::with_base_url(&config.market_api_url);
    let dashboard = CryptoDashboard::new(&config.data_path, Box::new(provider)).into_shared();
    info!(?dashboard, "dashboard initialised");

    let app = create_router(dashboard, config.static_dir.as_deref());

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl-C, shutting down");
    }
}
