//! Catalog rendering: projects the product list into display cards.
//!
//! Rendering is pure. The HTML for a card lives in `templates::catalog`; this
//! module decides what each card shows.

use crate::models::{Badge, Product};

#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    Image(String),
    Emoji(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: i64,
    pub name: String,
    pub desc: String,
    pub price: String,
    pub visual: Visual,
    pub badge: Badge,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Card {
    Product(ProductCard),
    /// Trailing "custom print" entry. Never part of the stored catalog.
    CustomOrder,
}

impl Card {
    pub fn product_id(&self) -> Option<i64> {
        match self {
            Card::Product(card) => Some(card.id),
            Card::CustomOrder => None,
        }
    }
}

pub fn render(products: &[Product]) -> Vec<Card> {
    products
        .iter()
        .map(|p| Card::Product(product_card(p)))
        .chain(std::iter::once(Card::CustomOrder))
        .collect()
}

fn product_card(product: &Product) -> ProductCard {
    let visual = match product.primary_image() {
        Some(url) => Visual::Image(url.to_string()),
        None => Visual::Emoji(product.visual_emoji().to_string()),
    };

    ProductCard {
        id: product.id,
        name: product.name.clone(),
        desc: product.desc.clone(),
        price: product.price_label(),
        visual,
        badge: product.badge,
    }
}

/// The last rendered grid. Refreshed after every catalog change.
#[derive(Debug, Clone)]
pub struct CatalogView {
    cards: Vec<Card>,
}

impl CatalogView {
    pub fn new(products: &[Product]) -> Self {
        Self {
            cards: render(products),
        }
    }

    pub fn refresh(&mut self, products: &[Product]) {
        self.cards = render(products);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn product_ids(&self) -> Vec<i64> {
        self.cards.iter().filter_map(Card::product_id).collect()
    }
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new(&[])
    }
}
