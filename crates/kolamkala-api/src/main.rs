//! KolamKala API Service
//!
//! REST API for contact messages, generated designs, image analysis and the
//! learning and gallery catalogs.

use anyhow::{Context, Result};
use kolamkala_api::{config::Config, create_router, AppState};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration (also reads .env, so RUST_LOG set there applies)
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kolamkala_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting KolamKala API Service");

    let analyzer = config.analyzer()?;
    if config.openai_api_key.is_some() {
        info!(
            "Image analysis: {} via {}",
            analyzer.name(),
            config.openai_base_url
        );
    } else {
        info!("Image analysis: OPENAI_API_KEY not set, serving the canned analysis");
    }

    // Create application state
    let state = AppState::new(analyzer);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(&config.api_address())
        .await
        .with_context(|| format!("Failed to bind to {}", config.api_address()))?;

    info!("KolamKala API listening on http://{}", config.api_address());
    info!("Health check: http://{}/health", config.api_address());

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
