//! Admin secret handling and the signed device cookies.
//!
//! The admin secret comes from STOREFRONT_ADMIN_SECRET and is kept only as an
//! Argon2 hash. A device that answered the unlock challenge carries an
//! HMAC-signed cookie; it never expires. This gates admin UI on trusted
//! devices and is not meant as a security boundary.

use crate::error::{ConfigError, LocalStorageError};
use crate::local::LocalStorage;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::sync::Mutex;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Prefix for every cookie written through `CookieStorage`.
pub const COOKIE_PREFIX: &str = "storefront_";

// ============================================================================
// Admin Secret
// ============================================================================

#[derive(Clone)]
pub struct AdminSecret {
    hash: Option<String>,
    signing_key: Vec<u8>,
}

impl AdminSecret {
    /// Hash the secret once at startup (Argon2id, ~100ms). `None` disables
    /// admin features entirely.
    pub fn from_secret(secret: Option<&str>) -> Result<Self, ConfigError> {
        let Some(secret) = secret.filter(|s| !s.is_empty()) else {
            return Ok(Self::disabled());
        };

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| ConfigError::Invalid("STOREFRONT_ADMIN_SECRET", e.to_string()))?
            .to_string();

        let mut hasher = Sha256::new();
        hasher.update(b"storefront-device:");
        hasher.update(secret.as_bytes());
        let signing_key = hasher.finalize().to_vec();

        Ok(Self {
            hash: Some(hash),
            signing_key,
        })
    }

    pub fn disabled() -> Self {
        Self {
            hash: None,
            signing_key: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.hash.is_some()
    }

    pub fn verify(&self, answer: &str) -> bool {
        let Some(hash) = &self.hash else {
            return false;
        };
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(answer.as_bytes(), &parsed)
            .is_ok()
    }

    fn sign(&self, payload: &str) -> Option<String> {
        let mut mac = HmacSha256::new_from_slice(&self.signing_key).ok()?;
        mac.update(payload.as_bytes());
        Some(hex::encode(mac.finalize().into_bytes()))
    }

    /// Token for one stored entry: `base64(key=value).signature`.
    pub fn seal(&self, key: &str, value: &str) -> Option<String> {
        if !self.is_enabled() {
            return None;
        }
        let payload = format!("{}={}", key, value);
        let signature = self.sign(&payload)?;
        Some(format!("{}.{}", URL_SAFE_NO_PAD.encode(payload.as_bytes()), signature))
    }

    /// Recover the value sealed for `key`, or `None` if the token was
    /// tampered with, belongs to another key or was signed with another secret.
    pub fn open(&self, key: &str, token: &str) -> Option<String> {
        if !self.is_enabled() {
            return None;
        }
        let (encoded, signature) = token.split_once('.')?;
        let payload = String::from_utf8(URL_SAFE_NO_PAD.decode(encoded).ok()?).ok()?;

        let expected = self.sign(&payload)?;
        let sig_bytes = signature.as_bytes();
        let expected_bytes = expected.as_bytes();
        if sig_bytes.len() != expected_bytes.len()
            || sig_bytes.ct_eq(expected_bytes).unwrap_u8() != 1
        {
            return None;
        }

        let (sealed_key, value) = payload.split_once('=')?;
        (sealed_key == key).then(|| value.to_string())
    }
}

// ============================================================================
// Cookie Storage
// ============================================================================

/// The visitor's device as `LocalStorage`: one signed, permanent cookie per
/// entry. Take the updated jar back with `into_jar` and return it with the
/// response.
pub struct CookieStorage {
    jar: Mutex<CookieJar>,
    secret: AdminSecret,
}

impl CookieStorage {
    pub fn new(jar: CookieJar, secret: &AdminSecret) -> Self {
        Self {
            jar: Mutex::new(jar),
            secret: secret.clone(),
        }
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

pub fn cookie_name(key: &str) -> String {
    format!("{}{}", COOKIE_PREFIX, key)
}

impl LocalStorage for CookieStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let jar = self.jar.lock().unwrap_or_else(|e| e.into_inner());
        let cookie = jar.get(&cookie_name(key))?;
        self.secret.open(key, cookie.value())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), LocalStorageError> {
        let Some(token) = self.secret.seal(key, value) else {
            return Ok(());
        };
        let cookie = Cookie::build((cookie_name(key), token))
            .path("/")
            .http_only(true)
            .secure(true)
            .same_site(SameSite::Strict)
            .permanent();

        let mut jar = self.jar.lock().unwrap_or_else(|e| e.into_inner());
        *jar = jar.clone().add(cookie);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), LocalStorageError> {
        let mut jar = self.jar.lock().unwrap_or_else(|e| e.into_inner());
        *jar = jar.clone().remove(Cookie::build((cookie_name(key), "")).path("/"));
        Ok(())
    }
}
