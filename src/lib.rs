//! Storefront library - re-exports for testing and external use.
//!
//! A small product catalog shop: a server-rendered product grid, per-product
//! detail pages, and an admin panel for editing the catalog on unlocked
//! devices. The catalog is kept in one record of a key-value store and
//! mirrored to a local cache file.

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod editor;
pub mod error;
pub mod handlers;
pub mod local;
pub mod models;
pub mod render;
pub mod store;
pub mod templates;
pub mod upstash;

use auth::AdminSecret;
use catalog::{CatalogSync, LoadSource};
use config::{Config, StoreBackend};
use editor::CatalogEditor;
use local::{FileStorage, LocalStorage};
use render::CatalogView;
use store::{MemoryStore, ProductStore, SledStore};
use upstash::UpstashStore;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// ============================================================================
// Storefront
// ============================================================================

/// The catalog and its rendered grid, always changed together.
pub struct Storefront {
    pub sync: CatalogSync,
    pub view: CatalogView,
}

impl Storefront {
    pub fn new(sync: CatalogSync) -> Self {
        let view = CatalogView::new(sync.products());
        Self { sync, view }
    }

    pub async fn load(&mut self) -> LoadSource {
        let source = self.sync.load().await;
        self.view.refresh(self.sync.products());
        source
    }

    pub fn editor(&mut self) -> CatalogEditor<'_> {
        CatalogEditor::new(&mut self.sync, &mut self.view)
    }
}

// ============================================================================
// Application State
// ============================================================================

pub struct AppState {
    pub storefront: Mutex<Storefront>,
    pub secret: AdminSecret,
}

impl AppState {
    /// Open the configured store and local cache, then load the catalog.
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        std::fs::create_dir_all(&config.data_dir)?;

        let store: Arc<dyn ProductStore> = match &config.store {
            StoreBackend::Sled => {
                let db = sled::open(config.db_path())?;
                Arc::new(SledStore::open(&db, config.products_key.clone())?)
            }
            StoreBackend::Upstash { rest_url, token } => Arc::new(UpstashStore::new(
                rest_url,
                token,
                config.products_key.clone(),
            )?),
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
        };
        let cache: Arc<dyn LocalStorage> = Arc::new(FileStorage::open(config.local_storage_path())?);
        let secret = AdminSecret::from_secret(config.admin_secret.as_deref())?;

        Ok(Self::with_parts(store, cache, secret).await)
    }

    pub async fn with_parts(
        store: Arc<dyn ProductStore>,
        cache: Arc<dyn LocalStorage>,
        secret: AdminSecret,
    ) -> Self {
        let mut storefront = Storefront::new(CatalogSync::new(store, cache));
        let source = storefront.load().await;
        tracing::info!(
            ?source,
            count = storefront.sync.products().len(),
            backend = storefront.sync.backend(),
            "catalog ready"
        );

        Self {
            storefront: Mutex::new(storefront),
            secret,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: Arc<AppState>, assets_dir: Option<&std::path::Path>) -> Router {
    let mut app = Router::new()
        // Pages
        .route("/", get(handlers::index))
        .route("/product", get(handlers::product_page))
        // Admin
        .route("/api/admin/unlock", post(handlers::unlock))
        .route("/api/admin/products", post(handlers::create_product))
        .route(
            "/api/admin/products/{id}",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        // Store pass-through
        .route(
            "/api/products",
            get(handlers::list_products).post(handlers::replace_products),
        );

    if let Some(dir) = assets_dir {
        app = app.nest_service("/assets", ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

// Re-export commonly used types
pub use admin::{AdminSession, AdminState, ChallengeOutcome, ADMIN_FLAG_KEY};
pub use catalog::{SaveReport, CACHE_KEY};
pub use editor::DeleteOutcome;
pub use error::{ApiError, ConfigError, EditorError, LocalStorageError, StoreError};
pub use models::{seed_catalog, Badge, Product, ProductDraft, ProductFields};
pub use render::{render, Card};
