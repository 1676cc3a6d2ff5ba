//! Governance API stub server: standalone development server.
//!
//! Serves the governance API in memory, seeded with the demo fixtures, so
//! the `bastion` CLI can run end to end without the real service.
//!
//! Environment:
//! - `BASTION_STUB_PORT` (default: 8080)
//! - `BASTION_STUB_PREFIX` (default: `/api`)
//! - `BASTION_LOG_FORMAT` (`json` for JSON logs)
//! - `RUST_LOG` (default: `info`)

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use bastion_stub::{router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("BASTION_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let port: u16 = std::env::var("BASTION_STUB_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let prefix = std::env::var("BASTION_STUB_PREFIX").unwrap_or_else(|_| "/api".to_string());

    let state = AppState::demo().map_err(|e| {
        tracing::error!("failed to load fixtures: {e}");
        e
    })?;
    let app = router(state, &prefix).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("bastion-stub listening on {addr} (api prefix {prefix})");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
