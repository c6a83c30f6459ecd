// API server entry point
//
// Usage: cargo run --features api --bin api_server

use crop_advisor::{create_router, AdvisorConfig, AppState};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // Default log level: info for our crate, warn for others
                "crop_advisor=info,tower_http=debug,axum=debug,warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AdvisorConfig::from_env();
    tracing::info!("Configuration:");
    tracing::info!("  CROP_MODEL_DIR: {}", config.model_dir.display());
    tracing::info!("  CROP_TOP_K: {}", config.top_k);
    tracing::info!("  PORT: {}", config.port);

    let state = match AppState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Startup failed: {:#}", e);
            std::process::exit(1);
        }
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
