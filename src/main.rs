//! Storefront - a small product catalog shop.
//!
//! This is the main entry point for the storefront web server.
//! The application is organized into the following modules:
//!
//! - `models`: Products, badges, admin form input and the seed catalog
//! - `store` / `upstash`: The product store backends
//! - `local`: Device-local persistence (catalog cache)
//! - `catalog`: Loading and saving the catalog
//! - `render`: Projecting the catalog into display cards
//! - `admin` / `auth`: Device unlock and signed cookies
//! - `editor`: Create, update and delete workflows
//! - `templates`: HTML/CSS/JS templates
//! - `handlers`: HTTP route handlers

use std::sync::Arc;

use storefront::{config::Config, router, AppState, BoxError};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=info,tower_http=info".into()),
        )
        .init();

    let config = Config::load()?;
    let state = Arc::new(AppState::new(&config).await?);

    if state.secret.is_enabled() {
        tracing::info!("Admin unlock: ENABLED (STOREFRONT_ADMIN_SECRET set)");
    } else {
        tracing::warn!("Admin unlock: DISABLED (set STOREFRONT_ADMIN_SECRET to enable editing)");
    }

    let assets_dir = config.assets_dir();
    std::fs::create_dir_all(&assets_dir)?;
    let app = router(state, Some(&assets_dir));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("Storefront running at http://{}", config.bind);
    tracing::info!("Data directory: {}", config.data_dir.display());

    axum::serve(listener, app).await?;
    Ok(())
}
