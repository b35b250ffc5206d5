mod config;
mod error;
mod guard;
mod handlers;
mod routes;
mod state;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::guard::OriginGuard;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Production gets its environment from the platform
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "purge_web=info,purge_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!("Starting purge-web with config: {:?}", config);

    let state = AppState::new(&config)?;
    let guard = OriginGuard::new(config.allowed_origins.clone());
    let app = routes::app_router(state, guard);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Media purge relay listening on http://localhost:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
