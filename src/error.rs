//! Error types for the storefront.
//!
//! Store and local-cache failures are recovered inside `CatalogSync` and only
//! ever logged; editor and API errors surface to the admin as HTTP statuses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store backend error: {0}")]
    Backend(String),

    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store unavailable")]
    Unavailable,
}

#[derive(Error, Debug)]
pub enum LocalStorageError {
    #[error("local storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("local storage is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, PartialEq)]
pub enum EditorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set when STOREFRONT_STORE={1}")]
    Missing(&'static str, String),

    #[error("unknown store backend '{0}' (expected 'sled', 'upstash' or 'memory')")]
    UnknownBackend(String),

    #[error("invalid {0}: {1}")]
    Invalid(&'static str, String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not unlocked on this device")]
    Locked,

    #[error("Wrong password")]
    WrongSecret,

    #[error("Product not found")]
    NotFound,

    #[error("Deletion not confirmed")]
    NotConfirmed,

    #[error("Failed to save products")]
    StoreWrite,

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Local(#[from] LocalStorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Locked | ApiError::WrongSecret => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::NotConfirmed | ApiError::Editor(_) => StatusCode::BAD_REQUEST,
            ApiError::StoreWrite | ApiError::Local(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
