// Gateway service main entry point
//
// - Axum = web framework, Tokio = async runtime.
// - Configuration is read once from the environment (see config.rs) and
//   passed into `app::build_app`; request handlers never read env vars.
// - Routes: `GET /` (fixed message), `POST /` (echo a JSON object),
//   `GET /healthz` (liveness).

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod error;
mod extract;
mod middleware;
mod routes;

use config::GatewayConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // RUST_LOG overrides the default `info` level.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config: GatewayConfig = GatewayConfig::from_env().context("invalid gateway configuration")?;
    let app = app::build_app(&config);

    // Only report that we're listening after bind succeeds.
    let listener: TcpListener = match TcpListener::bind(config.addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.addr, error = ?e, "failed to bind");
            return Err(e).with_context(|| format!("failed to bind {}", config.addr));
        }
    };
    tracing::info!(
        addr = %config.addr,
        allowed_origin = ?config.allowed_origin,
        body_limit = config.body_limit,
        log_post_body = config.log_post_body,
        "listening on http://{}",
        config.addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            // Wait for CTRL+C (SIGINT), then let in-flight requests finish.
            let _ = signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await
        .context("server error")?;

    Ok(())
}
