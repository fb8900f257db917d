//! HTTP route handlers for the storefront.
//!
//! Pages render from the in-memory catalog. Admin routes require a device
//! unlocked through the challenge; the unlock itself is stored in a signed
//! cookie (see `auth::CookieStorage`).

use crate::admin::{AdminSession, ChallengeOutcome};
use crate::auth::CookieStorage;
use crate::editor::DeleteOutcome;
use crate::error::{ApiError, EditorError};
use crate::models::{Product, ProductFields};
use crate::templates::{admin_panel_html, base_html, product_detail_html, product_grid_html};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

#[cfg(test)]
#[path = "handlers_test.rs"]
mod handlers_test;

fn is_unlocked(state: &AppState, jar: CookieJar) -> bool {
    AdminSession::restore(&CookieStorage::new(jar, &state.secret)).is_unlocked()
}

fn require_unlocked(state: &AppState, jar: CookieJar) -> Result<(), ApiError> {
    if is_unlocked(state, jar) {
        Ok(())
    } else {
        Err(ApiError::Locked)
    }
}

// ============================================================================
// Page Handlers
// ============================================================================

pub async fn index(State(state): State<Arc<AppState>>, jar: CookieJar) -> Html<String> {
    let unlocked = is_unlocked(&state, jar);
    let storefront = state.storefront.lock().await;

    let content = format!(
        r#"<section id="products">
            <h1>Products</h1>
            {grid}
        </section>
        <section id="contact" class="contact">
            <h2>Contact</h2>
            <p>Want something custom printed? Get in touch and we'll send you a quote.</p>
        </section>"#,
        grid = product_grid_html(storefront.view.cards()),
    );

    let panel = unlocked.then(|| admin_panel_html(storefront.sync.products()));
    Html(base_html("Lowkey Prints", &content, panel.as_deref()))
}

#[derive(Deserialize)]
pub struct ProductQuery {
    pub id: Option<String>,
}

pub async fn product_page(
    Query(query): Query<ProductQuery>,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Response {
    let unlocked = is_unlocked(&state, jar);
    let storefront = state.storefront.lock().await;

    let product = query
        .id
        .as_deref()
        .and_then(|id| id.trim().parse::<i64>().ok())
        .and_then(|id| storefront.sync.find(id));

    let panel = unlocked.then(|| admin_panel_html(storefront.sync.products()));

    match product {
        Some(product) => Html(base_html(
            &product.name,
            &product_detail_html(product),
            panel.as_deref(),
        ))
        .into_response(),
        None => {
            let html = r#"<a href="/" class="back-link">&larr; All products</a>
                <div class="message error">Product not found.</div>"#;
            (
                StatusCode::NOT_FOUND,
                Html(base_html("Not found", html, panel.as_deref())),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Unlock Handler
// ============================================================================

#[derive(Deserialize)]
pub struct UnlockBody {
    #[serde(default)]
    pub password: Option<String>,
}

pub async fn unlock(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<UnlockBody>,
) -> Result<Response, ApiError> {
    let storage = CookieStorage::new(jar, &state.secret);
    let mut session = AdminSession::restore(&storage);

    match session.answer_challenge(body.password.as_deref(), &state.secret, &storage)? {
        ChallengeOutcome::Unlocked | ChallengeOutcome::AlreadyUnlocked => {
            Ok((storage.into_jar(), Json(json!({ "unlocked": true }))).into_response())
        }
        ChallengeOutcome::Dismissed => Ok(Json(json!({ "unlocked": false })).into_response()),
        ChallengeOutcome::Rejected => Err(ApiError::WrongSecret),
    }
}

// ============================================================================
// Product Editing Handlers
// ============================================================================

pub async fn create_product(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(fields): Json<ProductFields>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    require_unlocked(&state, jar)?;

    let mut storefront = state.storefront.lock().await;
    let product = storefront.editor().create(&fields).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(fields): Json<ProductFields>,
) -> Result<Json<Product>, ApiError> {
    require_unlocked(&state, jar)?;

    let mut storefront = state.storefront.lock().await;
    match storefront.editor().update(id, &fields).await? {
        Some(product) => Ok(Json(product)),
        None => Err(ApiError::NotFound),
    }
}

#[derive(Deserialize)]
pub struct DeleteProductBody {
    #[serde(default)]
    pub confirm: bool,
}

pub async fn delete_product(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<DeleteProductBody>,
) -> Result<Json<Product>, ApiError> {
    require_unlocked(&state, jar)?;

    let mut storefront = state.storefront.lock().await;
    match storefront.editor().delete(id, body.confirm).await {
        DeleteOutcome::Deleted(product) => Ok(Json(product)),
        DeleteOutcome::NotFound => Err(ApiError::NotFound),
        DeleteOutcome::NotConfirmed => Err(ApiError::NotConfirmed),
    }
}

// ============================================================================
// Store Pass-through Handlers
// ============================================================================

pub async fn list_products(State(state): State<Arc<AppState>>) -> Json<Vec<Product>> {
    let storefront = state.storefront.lock().await;
    Json(storefront.sync.products().to_vec())
}

/// Replace the whole catalog with the posted list.
pub async fn replace_products(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(products): Json<Vec<Product>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_unlocked(&state, jar)?;

    let mut seen = HashSet::new();
    if let Some(dup) = products.iter().find(|p| !seen.insert(p.id)) {
        return Err(EditorError::InvalidInput(format!("duplicate product id {}", dup.id)).into());
    }

    let mut storefront = state.storefront.lock().await;
    storefront.sync.replace_products(products);
    let storefront = &mut *storefront;
    storefront.view.refresh(storefront.sync.products());
    let report = storefront.sync.save().await;

    if report.remote {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(ApiError::StoreWrite)
    }
}
