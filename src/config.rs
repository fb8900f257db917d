//! Runtime configuration, read once from the environment at startup.

use crate::error::ConfigError;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_DATA_DIR: &str = ".storefront";
pub const DEFAULT_PRODUCTS_KEY: &str = "storefront_products";

#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    Sled,
    Upstash { rest_url: String, token: String },
    /// Nothing survives a restart except the local cache.
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub data_dir: PathBuf,
    pub store: StoreBackend,
    pub products_key: String,
    pub admin_secret: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| -> String {
            lookup(key).filter(|v| !v.trim().is_empty()).unwrap_or_else(|| {
                info!("{key} not set, using default: {default}");
                default.to_string()
            })
        };

        let bind_raw = var("STOREFRONT_BIND", DEFAULT_BIND);
        let bind = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid("STOREFRONT_BIND", format!("{bind_raw}: {e}")))?;

        let backend = var("STOREFRONT_STORE", "sled").trim().to_lowercase();
        let store = match backend.as_str() {
            "sled" => StoreBackend::Sled,
            "memory" => StoreBackend::Memory,
            "upstash" => {
                let required = |key: &'static str| {
                    lookup(key)
                        .filter(|v| !v.trim().is_empty())
                        .ok_or_else(|| ConfigError::Missing(key, backend.clone()))
                };
                StoreBackend::Upstash {
                    rest_url: required("UPSTASH_REDIS_REST_URL")?,
                    token: required("UPSTASH_REDIS_REST_TOKEN")?,
                }
            }
            _ => return Err(ConfigError::UnknownBackend(backend.clone())),
        };

        let admin_secret = lookup("STOREFRONT_ADMIN_SECRET").filter(|s| !s.is_empty());

        Ok(Self {
            bind,
            data_dir: PathBuf::from(var("STOREFRONT_DATA_DIR", DEFAULT_DATA_DIR)),
            store,
            products_key: var("STOREFRONT_PRODUCTS_KEY", DEFAULT_PRODUCTS_KEY),
            admin_secret,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("db")
    }

    pub fn local_storage_path(&self) -> PathBuf {
        self.data_dir.join("local.json")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.data_dir.join("assets")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind, DEFAULT_BIND.parse::<SocketAddr>().unwrap());
        assert_eq!(config.store, StoreBackend::Sled);
        assert_eq!(config.products_key, DEFAULT_PRODUCTS_KEY);
        assert_eq!(config.admin_secret, None);
        assert_eq!(config.local_storage_path(), PathBuf::from(".storefront/local.json"));
    }

    #[test]
    fn test_upstash_requires_credentials() {
        let err = config(&[("STOREFRONT_STORE", "upstash")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("UPSTASH_REDIS_REST_URL", _)));

        let config = config(&[
            ("STOREFRONT_STORE", "Upstash"),
            ("UPSTASH_REDIS_REST_URL", "https://x.upstash.io"),
            ("UPSTASH_REDIS_REST_TOKEN", "tok"),
        ])
        .unwrap();
        assert_eq!(
            config.store,
            StoreBackend::Upstash {
                rest_url: "https://x.upstash.io".to_string(),
                token: "tok".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_unknown_backend_and_bad_bind() {
        assert!(matches!(
            config(&[("STOREFRONT_STORE", "postgres")]),
            Err(ConfigError::UnknownBackend(_))
        ));
        assert!(matches!(
            config(&[("STOREFRONT_BIND", "nowhere")]),
            Err(ConfigError::Invalid("STOREFRONT_BIND", _))
        ));
    }

    #[test]
    fn test_admin_secret() {
        let config = config(&[("STOREFRONT_ADMIN_SECRET", "lowkey2026")]).unwrap();
        assert_eq!(config.admin_secret.as_deref(), Some("lowkey2026"));
    }
}
