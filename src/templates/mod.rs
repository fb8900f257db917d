//! HTML templates and styling for the storefront.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants and theme definitions
//! - `components` - Shared HTML components (nav bar, admin panel, base template)
//! - `catalog` - Product grid and product detail views

mod catalog;
mod components;
mod styles;

pub use catalog::{product_detail_html, product_grid_html};
pub use components::{admin_panel_html, base_html, nav_bar};
pub use styles::STYLE;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
