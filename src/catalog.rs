//! Catalog synchronization between memory, the local cache and the product
//! store.
//!
//! `CatalogSync` owns the one authoritative product list. `load` never fails:
//! it degrades from the store to the seed catalog to the local cache to an
//! empty list. `save` always writes the local cache first, then makes a single
//! best-effort write to the store.

use crate::local::LocalStorage;
use crate::models::{seed_catalog, Product};
use crate::store::ProductStore;
use serde_json::Value;
use std::sync::Arc;

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

/// Local storage key holding the cached product list.
pub const CACHE_KEY: &str = "storefront_products";

/// Where the list adopted by `load` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Remote,
    Seeded,
    Cache,
    Empty,
}

/// What `save` managed to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReport {
    pub cached: bool,
    pub remote: bool,
}

pub struct CatalogSync {
    store: Arc<dyn ProductStore>,
    cache: Arc<dyn LocalStorage>,
    products: Vec<Product>,
}

impl CatalogSync {
    pub fn new(store: Arc<dyn ProductStore>, cache: Arc<dyn LocalStorage>) -> Self {
        Self {
            store,
            cache,
            products: Vec::new(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn products_mut(&mut self) -> &mut Vec<Product> {
        &mut self.products
    }

    pub fn find(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Swap in a whole new list. The caller is responsible for saving it.
    pub fn replace_products(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    pub async fn load(&mut self) -> LoadSource {
        match self.fetch_remote().await {
            Ok(products) if !products.is_empty() => {
                tracing::info!(count = products.len(), backend = self.backend(), "loaded catalog from store");
                self.products = products;
                LoadSource::Remote
            }
            Ok(_) => {
                tracing::info!(backend = self.backend(), "store is empty, populating seed catalog");
                self.products = seed_catalog();
                self.save().await;
                LoadSource::Seeded
            }
            Err(reason) => {
                tracing::error!(backend = self.backend(), %reason, "failed to fetch products, falling back to local cache");
                match self.read_cache() {
                    Some(products) => {
                        tracing::info!(count = products.len(), "loaded catalog from local cache");
                        self.products = products;
                        LoadSource::Cache
                    }
                    None => {
                        self.products = Vec::new();
                        LoadSource::Empty
                    }
                }
            }
        }
    }

    pub async fn save(&self) -> SaveReport {
        let cached = self.write_cache();

        let remote = match serde_json::to_value(&self.products) {
            Ok(value) => match self.store.set(&value).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::error!(backend = self.backend(), error = %e, "failed to save products to store");
                    false
                }
            },
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize products");
                false
            }
        };

        SaveReport { cached, remote }
    }

    async fn fetch_remote(&self) -> Result<Vec<Product>, String> {
        let value = self.store.get().await.map_err(|e| e.to_string())?;
        match value {
            None => Ok(Vec::new()),
            Some(value) => decode_products(value)
                .map_err(|e| format!("stored catalog is malformed: {}", e)),
        }
    }

    fn read_cache(&self) -> Option<Vec<Product>> {
        let text = self.cache.get_item(CACHE_KEY)?;
        let decoded = serde_json::from_str::<Value>(&text)
            .map_err(|e| e.to_string())
            .and_then(decode_products);
        match decoded {
            Ok(products) => Some(products),
            Err(e) => {
                tracing::warn!(error = %e, "local catalog cache is unreadable");
                None
            }
        }
    }

    fn write_cache(&self) -> bool {
        let json = match serde_json::to_string(&self.products) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize products for local cache");
                return false;
            }
        };
        match self.cache.set_item(CACHE_KEY, &json) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "failed to write local catalog cache");
                false
            }
        }
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode a persisted product list one record at a time.
///
/// Older editors could persist a record whose price is `null` (an empty
/// price field) or a string; those prices read as a number where possible
/// and as zero otherwise. Records that still fail to decode are dropped.
/// Only a value that is not a list, or a non-empty list with no readable
/// record, fails as a whole.
pub fn decode_products(value: Value) -> Result<Vec<Product>, String> {
    let Value::Array(records) = value else {
        return Err("expected a list of products".to_string());
    };
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let total = records.len();
    let products: Vec<Product> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| decode_record(index, record))
        .collect();

    if products.is_empty() {
        return Err(format!("none of the {} records could be read", total));
    }
    Ok(products)
}

fn decode_record(index: usize, mut record: Value) -> Option<Product> {
    if coerce_price(&mut record) {
        tracing::warn!(index, id = ?record.get("id"), "product price unreadable, coerced");
    }
    match serde_json::from_value::<Product>(record) {
        Ok(product) => Some(product),
        Err(e) => {
            tracing::warn!(index, error = %e, "skipping unreadable product record");
            None
        }
    }
}

/// Replace a non-numeric `price` with a number. Returns whether it changed.
fn coerce_price(record: &mut Value) -> bool {
    let Some(fields) = record.as_object_mut() else {
        return false;
    };
    let price = fields.entry("price").or_insert(Value::Null);
    if price.is_number() {
        return false;
    }
    let coerced = price
        .as_str()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|p| p.is_finite() && *p >= 0.0)
        .unwrap_or(0.0);
    *price = serde_json::json!(coerced);
    true
}
