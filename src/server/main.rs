use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use license_probe::config::ProbeConfig;
use license_probe::errors::{ProbeError, ProbeResult};
use license_probe::logging::init_tracing_always;
use license_probe::server::{build_router, AppState, LicenseStore, LICENSE_PATH};

/// Local stand-in for the license endpoint, seeded with the configured valid credentials.
#[tokio::main]
async fn main() -> ProbeResult<()> {
    let config = ProbeConfig::load()?;
    init_tracing_always(&config.logging);

    let store = LicenseStore::seeded(&config.credentials)?;
    let app = build_router(AppState {
        store: Arc::new(store),
    });

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| ProbeError::ConfigError(format!("invalid server address: {e}")))?;

    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, path = LICENSE_PATH, "License server listening");
    println!("Listening on http://{}{}", addr, LICENSE_PATH);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
