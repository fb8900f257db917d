//! Product grid and product detail views.

use crate::models::Product;
use crate::render::{Card, ProductCard, Visual};

use super::html_escape;

// ============================================================================
// Product Grid
// ============================================================================

pub fn product_grid_html(cards: &[Card]) -> String {
    let mut html = String::from(r#"<div class="products-grid">"#);
    for card in cards {
        match card {
            Card::Product(card) => html.push_str(&product_card_html(card)),
            Card::CustomOrder => html.push_str(CUSTOM_CARD),
        }
    }
    html.push_str("</div>");
    html
}

fn product_card_html(card: &ProductCard) -> String {
    let badge_html = match card.badge.label() {
        Some(label) => format!(
            r#"<span class="product-badge {}">{}</span>"#,
            card.badge.as_str(),
            label
        ),
        None => String::new(),
    };

    // Clicking a card opens the detail view unless the visitor is selecting text.
    format!(
        r#"<article class="product-card" data-id="{id}"
                 onclick="if (!window.getSelection().toString()) window.location.href='/product?id={id}'">
            <div class="product-image">
                <div class="product-placeholder">{visual}</div>
                {badge}
            </div>
            <div class="product-info">
                <h3 class="product-title">{name}</h3>
                <p class="product-desc">{desc}</p>
                <div class="product-footer">
                    <span class="product-price">{price}</span>
                    <a href="/product?id={id}" class="btn btn-small">Order</a>
                </div>
            </div>
        </article>"#,
        id = card.id,
        visual = visual_html(&card.visual, &card.name),
        badge = badge_html,
        name = html_escape(&card.name),
        desc = html_escape(&card.desc),
        price = html_escape(&card.price),
    )
}

fn visual_html(visual: &Visual, alt: &str) -> String {
    match visual {
        Visual::Image(url) => format!(
            r#"<img src="{}" alt="{}">"#,
            html_escape(url),
            html_escape(alt)
        ),
        Visual::Emoji(emoji) => format!("<span>{}</span>", html_escape(emoji)),
    }
}

const CUSTOM_CARD: &str = r##"<article class="product-card custom-card">
            <div class="product-image">
                <div class="product-placeholder custom">
                    <span>✨</span>
                    <p>Your Idea Here</p>
                </div>
            </div>
            <div class="product-info">
                <h3 class="product-title">Custom Print</h3>
                <p class="product-desc">Got a design in mind? Let's make it!</p>
                <div class="product-footer">
                    <span class="product-price">Quote</span>
                    <a href="#contact" class="btn btn-small">Contact Us</a>
                </div>
            </div>
        </article>"##;

// ============================================================================
// Product Detail
// ============================================================================

pub fn product_detail_html(product: &Product) -> String {
    let images = product.image_list();

    let main_visual = match images.first() {
        Some(url) => visual_html(&Visual::Image(url.clone()), &product.name),
        None => visual_html(&Visual::Emoji(product.visual_emoji().to_string()), &product.name),
    };

    let thumbs_html = if images.len() > 1 {
        let thumbs: String = images
            .iter()
            .map(|url| {
                format!(
                    r#"<img src="{url}" alt="" onclick="document.querySelector('.gallery-main img').src=this.src">"#,
                    url = html_escape(url)
                )
            })
            .collect();
        format!(r#"<div class="gallery-thumbs">{}</div>"#, thumbs)
    } else {
        String::new()
    };

    let badge_html = match product.badge.label() {
        Some(label) => format!(
            r#"<span class="product-badge {}">{}</span>"#,
            product.badge.as_str(),
            label
        ),
        None => String::new(),
    };

    format!(
        r##"<a href="/" class="back-link">&larr; All products</a>
        <div class="product-detail" data-id="{id}">
            <div>
                <div class="gallery-main product-image">
                    <div class="product-placeholder">{main}</div>
                    {badge}
                </div>
                {thumbs}
            </div>
            <div>
                <h1>{name}</h1>
                <p class="product-price">{price}</p>
                <p>{desc}</p>
                <p style="margin-top: 1rem;"><a href="/#contact" class="btn">Ask about this print</a></p>
            </div>
        </div>"##,
        id = product.id,
        main = main_visual,
        badge = badge_html,
        thumbs = thumbs_html,
        name = html_escape(&product.name),
        price = html_escape(&product.price_label()),
        desc = html_escape(&product.desc),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed_catalog;
    use crate::render::render;

    #[test]
    fn test_grid_has_card_per_product_plus_custom() {
        let html = product_grid_html(&render(&seed_catalog()));
        assert_eq!(html.matches("<article").count(), 6);
        assert_eq!(html.matches("custom-card").count(), 1);
        assert!(html.contains(r#"data-id="1""#));
        assert!(html.contains("/product?id=5"));
        assert!(html.contains("$12.00"));
        assert!(html.contains(r#"<span class="product-badge new">New</span>"#));
    }

    #[test]
    fn test_grid_escapes_product_text() {
        let mut products = seed_catalog();
        products[0].name = "<script>alert(1)</script>".to_string();
        let html = product_grid_html(&render(&products));
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_detail_gallery() {
        let mut product = seed_catalog().remove(0);
        assert!(!product_detail_html(&product).contains("gallery-thumbs"));

        product.images = vec!["a.png".to_string(), "b.png".to_string()];
        product.normalize_images();
        let html = product_detail_html(&product);
        assert!(html.contains("gallery-thumbs"));
        assert!(html.contains(r#"src="b.png""#));
    }
}
