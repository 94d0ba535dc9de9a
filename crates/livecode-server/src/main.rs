//! Binary entrypoint for the livecode HTTP server.
//!
//! Configuration comes from environment variables, see
//! [`livecode_server::config`]. Log verbosity follows `RUST_LOG`
//! (default: "info").

use std::process;

use tracing_subscriber::EnvFilter;

use livecode_server::config::ServerConfig;
use livecode_server::router::build_router;
use livecode_server::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!("{e}");
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    let state = AppState::new(&config)?;
    let app = build_router(state);

    let addr = config.addr();
    tracing::info!(assets = %config.assets_dir.display(), "livecode server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
