//! Create, update and delete workflows for the catalog.
//!
//! Every successful change re-renders the grid and then saves, in that
//! order. Changes that resolve to nothing (unknown id, unconfirmed delete)
//! neither render nor save.

use crate::catalog::CatalogSync;
use crate::error::EditorError;
use crate::models::{Product, ProductFields};
use crate::render::CatalogView;
use chrono::Utc;

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted(Product),
    NotFound,
    NotConfirmed,
}

pub struct CatalogEditor<'a> {
    sync: &'a mut CatalogSync,
    view: &'a mut CatalogView,
}

impl<'a> CatalogEditor<'a> {
    pub fn new(sync: &'a mut CatalogSync, view: &'a mut CatalogView) -> Self {
        Self { sync, view }
    }

    pub async fn create(&mut self, fields: &ProductFields) -> Result<Product, EditorError> {
        self.create_at(fields, Utc::now().timestamp_millis()).await
    }

    /// `create` with an explicit clock reading, in milliseconds.
    pub async fn create_at(
        &mut self,
        fields: &ProductFields,
        now_millis: i64,
    ) -> Result<Product, EditorError> {
        let draft = fields.validate()?.with_creation_defaults();
        let id = next_id(self.sync.products(), now_millis)
            .ok_or_else(|| EditorError::InvalidInput("no free product id".to_string()))?;
        let product = Product::from_draft(id, draft);

        self.sync.products_mut().push(product.clone());
        tracing::info!(id, name = %product.name, "product created");
        self.commit().await;
        Ok(product)
    }

    /// Replace every mutable field of product `id`. `Ok(None)` if there is
    /// no such product.
    pub async fn update(
        &mut self,
        id: i64,
        fields: &ProductFields,
    ) -> Result<Option<Product>, EditorError> {
        if self.sync.find(id).is_none() {
            tracing::debug!(id, "update ignored, no such product");
            return Ok(None);
        }
        let draft = fields.validate()?;

        let updated = match self.sync.products_mut().iter_mut().find(|p| p.id == id) {
            Some(product) => {
                product.apply(draft);
                product.clone()
            }
            None => return Ok(None),
        };

        tracing::info!(id, "product updated");
        self.commit().await;
        Ok(Some(updated))
    }

    pub async fn delete(&mut self, id: i64, confirmed: bool) -> DeleteOutcome {
        if !confirmed {
            return DeleteOutcome::NotConfirmed;
        }

        let products = self.sync.products_mut();
        let Some(index) = products.iter().position(|p| p.id == id) else {
            tracing::debug!(id, "delete ignored, no such product");
            return DeleteOutcome::NotFound;
        };
        let removed = products.remove(index);

        tracing::info!(id, name = %removed.name, "product deleted");
        self.commit().await;
        DeleteOutcome::Deleted(removed)
    }

    async fn commit(&mut self) {
        self.view.refresh(self.sync.products());
        self.sync.save().await;
    }
}

/// A fresh id from the clock, kept above every existing id so ids stay
/// unique and increasing even if the clock repeats or goes backwards.
///
/// Once some id is `i64::MAX` nothing fits above it; the clock reading is
/// used if no product holds it, otherwise there is no id to give.
pub fn next_id(products: &[Product], now_millis: i64) -> Option<i64> {
    let Some(max) = products.iter().map(|p| p.id).max() else {
        return Some(now_millis);
    };
    match max.checked_add(1) {
        Some(floor) => Some(now_millis.max(floor)),
        None => (!products.iter().any(|p| p.id == now_millis)).then_some(now_millis),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CACHE_KEY;
    use crate::local::{LocalStorage, MemoryStorage};
    use crate::models::{seed_catalog, Badge};
    use crate::store::MemoryStore;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Arc;

    struct Fixture {
        store: Arc<MemoryStore>,
        cache: Arc<MemoryStorage>,
        sync: CatalogSync,
        view: CatalogView,
    }

    fn fixture(products: Vec<Product>) -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let cache = Arc::new(MemoryStorage::new());
        let mut sync = CatalogSync::new(store.clone(), cache.clone());
        sync.replace_products(products);
        let view = CatalogView::new(sync.products());
        Fixture { store, cache, sync, view }
    }

    fn fields(name: &str, price: &str) -> ProductFields {
        ProductFields {
            name: name.to_string(),
            price: price.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(&[], 1_700_000_000_000), Some(1_700_000_000_000));
        let seed = seed_catalog();
        assert_eq!(next_id(&seed, 1_700_000_000_000), Some(1_700_000_000_000));
        assert_eq!(next_id(&seed, 3), Some(6));
    }

    #[test]
    fn test_next_id_at_the_top_of_the_range() {
        let mut products = seed_catalog();
        products[0].id = i64::MAX;
        assert_eq!(next_id(&products, 5), Some(5));
        assert_eq!(next_id(&products, 2), None);
    }

    #[tokio::test]
    async fn test_create_after_max_id_does_not_panic() {
        let mut top = seed_catalog().remove(0);
        top.id = i64::MAX;
        let mut fx = fixture(vec![top]);
        let mut editor = CatalogEditor::new(&mut fx.sync, &mut fx.view);

        let created = editor.create_at(&fields("Widget", "1"), 5).await.unwrap();
        assert_eq!(created.id, 5);

        let err = editor.create_at(&fields("Again", "1"), 5).await.unwrap_err();
        assert!(matches!(err, EditorError::InvalidInput(_)));
        assert_eq!(fx.sync.products().len(), 2);
        assert_eq!(fx.store.writes(), 1);
    }

    #[tokio::test]
    async fn test_create_then_update_images() {
        let mut fx = fixture(Vec::new());
        let mut editor = CatalogEditor::new(&mut fx.sync, &mut fx.view);

        let created = editor.create_at(&fields("Widget", "9.5"), 1_000).await.unwrap();
        assert_eq!(created.id, 1_000);
        assert_eq!(created.price, Decimal::from_str("9.5").unwrap());
        assert_eq!(created.desc, "Amazing 3D print");
        assert_eq!(created.emoji, "📦");
        assert!(created.images.is_empty());
        assert_eq!(created.image, "");

        let mut edit = fields("Widget", "9.5");
        edit.images = "a.png\nb.png\n".to_string();
        let updated = editor.update(created.id, &edit).await.unwrap().unwrap();
        assert_eq!(updated.image, "a.png");
        assert_eq!(updated.images, vec!["a.png".to_string(), "b.png".to_string()]);

        assert_eq!(fx.sync.products(), &[updated]);
        assert_eq!(fx.view.product_ids(), vec![1_000]);
        assert_eq!(fx.store.writes(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_without_saving() {
        let mut fx = fixture(seed_catalog());
        let mut editor = CatalogEditor::new(&mut fx.sync, &mut fx.view);

        let err = editor.create(&fields("Widget", "nine")).await.unwrap_err();
        assert!(matches!(err, EditorError::InvalidInput(_)));
        assert!(editor.create(&fields("", "1")).await.is_err());

        assert_eq!(fx.sync.products().len(), 5);
        assert_eq!(fx.store.writes(), 0);
        assert_eq!(fx.cache.get_item(CACHE_KEY), None);
    }

    #[tokio::test]
    async fn test_create_ids_stay_unique() {
        let mut fx = fixture(Vec::new());
        let mut editor = CatalogEditor::new(&mut fx.sync, &mut fx.view);

        let a = editor.create_at(&fields("A", "1"), 500).await.unwrap();
        let b = editor.create_at(&fields("B", "1"), 500).await.unwrap();
        let c = editor.create_at(&fields("C", "1"), 100).await.unwrap();
        assert_eq!((a.id, b.id, c.id), (500, 501, 502));
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_id() {
        let mut fx = fixture(seed_catalog());
        let mut editor = CatalogEditor::new(&mut fx.sync, &mut fx.view);

        let edit = ProductFields {
            name: "Dragon XL".to_string(),
            desc: String::new(),
            price: "25".to_string(),
            emoji: "🐲".to_string(),
            badge: "popular".to_string(),
            images: "  \n dragon.png \n".to_string(),
        };
        let updated = editor.update(2, &edit).await.unwrap().unwrap();
        assert_eq!(updated.id, 2);
        assert_eq!(updated.name, "Dragon XL");
        assert_eq!(updated.desc, "");
        assert_eq!(updated.badge, Badge::Popular);
        assert_eq!(updated.images, vec!["dragon.png".to_string()]);
        assert_eq!(updated.image, "dragon.png");
        assert_eq!(fx.sync.find(2), Some(&updated));
        assert_eq!(fx.store.writes(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_noop() {
        let mut fx = fixture(seed_catalog());
        let mut editor = CatalogEditor::new(&mut fx.sync, &mut fx.view);

        let result = editor.update(99, &fields("Ghost", "1")).await.unwrap();
        assert_eq!(result, None);
        assert_eq!(fx.sync.products(), seed_catalog().as_slice());
        assert_eq!(fx.store.writes(), 0);
    }

    #[tokio::test]
    async fn test_update_invalid_input_leaves_product() {
        let mut fx = fixture(seed_catalog());
        let mut editor = CatalogEditor::new(&mut fx.sync, &mut fx.view);

        assert!(editor.update(1, &fields("Stand", "-1")).await.is_err());
        assert_eq!(fx.sync.products(), seed_catalog().as_slice());
        assert_eq!(fx.store.writes(), 0);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let mut fx = fixture(seed_catalog());
        let mut editor = CatalogEditor::new(&mut fx.sync, &mut fx.view);

        assert_eq!(editor.delete(3, false).await, DeleteOutcome::NotConfirmed);
        assert_eq!(fx.sync.products().len(), 5);
        assert_eq!(fx.store.writes(), 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_skips_save() {
        let mut fx = fixture(seed_catalog());
        let mut editor = CatalogEditor::new(&mut fx.sync, &mut fx.view);

        assert_eq!(editor.delete(42, true).await, DeleteOutcome::NotFound);
        assert_eq!(fx.sync.products(), seed_catalog().as_slice());
        assert_eq!(fx.store.writes(), 0);
        assert_eq!(fx.cache.get_item(CACHE_KEY), None);
    }

    #[tokio::test]
    async fn test_delete_renders_then_saves() {
        let mut fx = fixture(seed_catalog());
        let mut editor = CatalogEditor::new(&mut fx.sync, &mut fx.view);

        let outcome = editor.delete(3, true).await;
        assert!(matches!(outcome, DeleteOutcome::Deleted(ref p) if p.id == 3));
        assert_eq!(fx.view.product_ids(), vec![1, 2, 4, 5]);
        assert_eq!(fx.view.cards().len(), 5);
        assert_eq!(fx.store.writes(), 1);

        let stored: Vec<Product> = serde_json::from_value(fx.store.snapshot().unwrap()).unwrap();
        assert_eq!(stored, fx.sync.products());
    }

    #[tokio::test]
    async fn test_remote_failure_still_applies_change() {
        let mut fx = fixture(seed_catalog());
        fx.store.set_failing(true);
        let mut editor = CatalogEditor::new(&mut fx.sync, &mut fx.view);

        editor.create_at(&fields("Offline", "2"), 10_000).await.unwrap();
        assert_eq!(fx.sync.products().len(), 6);
        let cached: Vec<Product> =
            serde_json::from_str(&fx.cache.get_item(CACHE_KEY).unwrap()).unwrap();
        assert_eq!(cached.len(), 6);
    }
}
