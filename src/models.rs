//! Data models for the storefront.
//!
//! `Product` is the catalog's only entity. Its serialized form matches the
//! records already held in the product store, including older records that
//! carry only the single legacy `image` field.

use crate::error::EditorError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Description used when a product is created without one.
pub const DEFAULT_DESC: &str = "Amazing 3D print";

/// Visual used when a product has neither images nor an emoji.
pub const DEFAULT_EMOJI: &str = "📦";

// ============================================================================
// Product
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Legacy single image, mirrors `images[0]`.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub badge: Badge,
}

impl Product {
    pub fn from_draft(id: i64, draft: ProductDraft) -> Self {
        let mut product = Product {
            id,
            name: String::new(),
            desc: String::new(),
            price: Decimal::ZERO,
            emoji: String::new(),
            images: Vec::new(),
            image: String::new(),
            badge: Badge::None,
        };
        product.apply(draft);
        product
    }

    /// Replace every mutable field. The id is left alone.
    pub fn apply(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.desc = draft.desc;
        self.price = draft.price;
        self.emoji = draft.emoji;
        self.badge = draft.badge;
        self.images = draft.images;
        self.normalize_images();
    }

    /// Images to show for this product. Older records only carry `image`,
    /// so it stands in for the list when `images` is empty.
    pub fn image_list(&self) -> Vec<String> {
        if !self.images.is_empty() {
            self.images.clone()
        } else if !self.image.is_empty() {
            vec![self.image.clone()]
        } else {
            Vec::new()
        }
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .first()
            .map(String::as_str)
            .or_else(|| Some(self.image.as_str()).filter(|s| !s.is_empty()))
    }

    /// Restore `image == images[0]` (or empty when there are no images).
    pub fn normalize_images(&mut self) {
        self.image = self.images.first().cloned().unwrap_or_default();
    }

    /// Price to the cent, half-cents rounded away from zero.
    pub fn price_label(&self) -> String {
        let cents = self
            .price
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("${:.2}", cents)
    }

    pub fn visual_emoji(&self) -> &str {
        if self.emoji.is_empty() {
            DEFAULT_EMOJI
        } else {
            &self.emoji
        }
    }
}

// ============================================================================
// Badge
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Badge {
    New,
    Popular,
    #[default]
    None,
}

impl Badge {
    pub fn as_str(&self) -> &'static str {
        match self {
            Badge::New => "new",
            Badge::Popular => "popular",
            Badge::None => "",
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            Badge::New => Some("New"),
            Badge::Popular => Some("Popular"),
            Badge::None => None,
        }
    }

    /// Strict parse used for admin input; stored records go through `From<String>`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "new" => Some(Badge::New),
            "popular" => Some(Badge::Popular),
            "" => Some(Badge::None),
            _ => None,
        }
    }
}

impl From<String> for Badge {
    fn from(s: String) -> Self {
        Badge::parse(&s).unwrap_or(Badge::None)
    }
}

impl From<Badge> for String {
    fn from(b: Badge) -> Self {
        b.as_str().to_string()
    }
}

// ============================================================================
// Admin Input
// ============================================================================

/// Raw product form input, exactly as the admin panel submits it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub badge: String,
    /// One image URL per line.
    #[serde(default)]
    pub images: String,
}

/// Validated product fields, ready to be applied to a `Product`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub desc: String,
    pub price: Decimal,
    pub emoji: String,
    pub badge: Badge,
    pub images: Vec<String>,
}

impl ProductFields {
    pub fn validate(&self) -> Result<ProductDraft, EditorError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EditorError::InvalidInput("name is required".to_string()));
        }

        let price = parse_price(&self.price)?;

        let badge = Badge::parse(&self.badge).ok_or_else(|| {
            EditorError::InvalidInput(format!("unknown badge '{}'", self.badge.trim()))
        })?;

        Ok(ProductDraft {
            name: name.to_string(),
            desc: self.desc.trim().to_string(),
            price,
            emoji: self.emoji.trim().to_string(),
            badge,
            images: split_image_lines(&self.images),
        })
    }
}

impl ProductDraft {
    /// Fill the placeholders a brand new product gets for omitted fields.
    pub fn with_creation_defaults(mut self) -> Self {
        if self.desc.is_empty() {
            self.desc = DEFAULT_DESC.to_string();
        }
        if self.emoji.is_empty() {
            self.emoji = DEFAULT_EMOJI.to_string();
        }
        self
    }
}

pub fn parse_price(raw: &str) -> Result<Decimal, EditorError> {
    let raw = raw.trim();
    let price = Decimal::from_str(raw)
        .map_err(|_| EditorError::InvalidInput(format!("price '{}' is not a number", raw)))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(EditorError::InvalidInput(format!(
            "price '{}' must not be negative",
            raw
        )));
    }
    Ok(price)
}

/// Split a newline-delimited block into image URLs, dropping blank lines.
pub fn split_image_lines(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Seed Catalog
// ============================================================================

/// The five products an empty store is populated with.
pub fn seed_catalog() -> Vec<Product> {
    let seed = |id: i64, name: &str, desc: &str, price: i64, emoji: &str, badge: Badge| Product {
        id,
        name: name.to_string(),
        desc: desc.to_string(),
        price: Decimal::from(price),
        emoji: emoji.to_string(),
        images: Vec::new(),
        image: String::new(),
        badge,
    };

    vec![
        seed(1, "Gaming Controller Stand", "Keep your controllers organized in style", 12, "🎮", Badge::Popular),
        seed(2, "Articulated Dragon", "Fully movable joints, multiple colors", 18, "🐉", Badge::New),
        seed(3, "Phone Stand", "Adjustable angle, fits all phones", 8, "📱", Badge::None),
        seed(4, "Pencil Holder", "Geometric design, desk essential", 6, "🎨", Badge::None),
        seed(5, "Custom Keychain", "Personalized with your name or design", 5, "🔑", Badge::None),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(name: &str, price: &str) -> ProductFields {
        ProductFields {
            name: name.to_string(),
            price: price.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_legacy_record_reads_with_defaults() {
        let value = json!({
            "id": 3,
            "name": "Phone Stand",
            "desc": "Adjustable angle, fits all phones",
            "price": 8,
            "emoji": "📱",
            "image": "stand.png",
            "badge": ""
        });
        let product: Product = serde_json::from_value(value).unwrap();
        assert!(product.images.is_empty());
        assert_eq!(product.image_list(), vec!["stand.png".to_string()]);
        assert_eq!(product.primary_image(), Some("stand.png"));
        assert_eq!(product.badge, Badge::None);
        assert_eq!(product.price, Decimal::from(8));
    }

    #[test]
    fn test_unknown_badge_reads_as_none() {
        let value = json!({"id": 1, "name": "x", "price": 1.5, "badge": "sale"});
        let product: Product = serde_json::from_value(value).unwrap();
        assert_eq!(product.badge, Badge::None);
    }

    #[test]
    fn test_serialized_shape() {
        let product = seed_catalog().remove(1);
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["badge"], "new");
        assert_eq!(value["image"], "");
        assert_eq!(value["images"], json!([]));
        assert_eq!(value["price"].as_f64(), Some(18.0));
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert!(matches!(fields("", "1").validate(), Err(EditorError::InvalidInput(_))));
        assert!(matches!(fields("   ", "1").validate(), Err(EditorError::InvalidInput(_))));
        assert!(matches!(fields("Widget", "abc").validate(), Err(EditorError::InvalidInput(_))));
        assert!(matches!(fields("Widget", "").validate(), Err(EditorError::InvalidInput(_))));
        assert!(matches!(fields("Widget", "-2").validate(), Err(EditorError::InvalidInput(_))));

        let mut bad_badge = fields("Widget", "1");
        bad_badge.badge = "hot".to_string();
        assert!(bad_badge.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_zero_and_decimals() {
        let draft = fields("Widget", " 9.5 ").validate().unwrap();
        assert_eq!(draft.price, Decimal::from_str("9.5").unwrap());
        assert_eq!(fields("Free", "0").validate().unwrap().price, Decimal::ZERO);
    }

    #[test]
    fn test_creation_defaults() {
        let draft = fields("Widget", "3").validate().unwrap().with_creation_defaults();
        assert_eq!(draft.desc, DEFAULT_DESC);
        assert_eq!(draft.emoji, DEFAULT_EMOJI);
    }

    #[test]
    fn test_split_image_lines() {
        let images = split_image_lines("a.png\n\n  b.png  \r\n   \n");
        assert_eq!(images, vec!["a.png".to_string(), "b.png".to_string()]);
    }

    #[test]
    fn test_apply_normalizes_legacy_image() {
        let mut product = seed_catalog().remove(0);
        product.image = "stale.png".to_string();
        let draft = fields("Stand", "12").validate().unwrap();
        product.apply(draft);
        assert!(product.images.is_empty());
        assert_eq!(product.image, "");
    }

    #[test]
    fn test_price_label() {
        let mut product = seed_catalog().remove(0);
        assert_eq!(product.price_label(), "$12.00");
        product.price = Decimal::from_str("9.5").unwrap();
        assert_eq!(product.price_label(), "$9.50");
    }

    #[test]
    fn test_price_label_rounds_half_cents() {
        let mut product = seed_catalog().remove(0);
        for (price, label) in [
            ("0.125", "$0.13"),
            ("9.995", "$10.00"),
            ("1.005", "$1.01"),
            ("2.675", "$2.68"),
            ("2.674", "$2.67"),
        ] {
            product.price = Decimal::from_str(price).unwrap();
            assert_eq!(product.price_label(), label, "{}", price);
        }
    }

    #[test]
    fn test_seed_catalog_ids_unique() {
        let seed = seed_catalog();
        assert_eq!(seed.len(), 5);
        let ids: Vec<i64> = seed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }
}
