//! Shared HTML components for the storefront.
//!
//! Contains the navigation bar, the admin panel overlay and the base HTML
//! template.

use crate::models::Product;

use super::html_escape;
use super::styles::STYLE;

// ============================================================================
// Navigation Bar
// ============================================================================

pub fn nav_bar(unlocked: bool) -> String {
    let admin_link = if unlocked {
        r#"<button onclick="openAdmin()">Admin</button>"#
    } else {
        ""
    };

    format!(
        r##"<nav class="nav-bar">
            <a href="/" class="brand">Lowkey Prints</a>
            <a href="/#products">Products</a>
            <a href="/#contact">Contact</a>
            <span class="spacer"></span>
            {}
        </nav>"##,
        admin_link
    )
}

// ============================================================================
// Admin Panel
// ============================================================================

const BADGE_OPTIONS: &str = r#"<option value="">None</option>
                        <option value="new">New</option>
                        <option value="popular">Popular</option>"#;

pub fn admin_panel_html(products: &[Product]) -> String {
    let edit_items: String = products.iter().map(edit_item_html).collect();
    let edit_list = if edit_items.is_empty() {
        r#"<p class="product-desc">No products yet.</p>"#.to_string()
    } else {
        edit_items
    };

    format!(
        r##"
    <button class="admin-btn" onclick="openAdmin()" title="Admin">⚙</button>

    <div class="modal-overlay" id="adminModal" onclick="if(event.target===this)closeAdmin()">
        <div class="modal">
            <div class="modal-header">
                <h2>Admin</h2>
                <button class="modal-close" onclick="closeAdmin()">&times;</button>
            </div>
            <div class="tabs">
                <button class="tab-btn active" data-tab="add" onclick="switchTab('add')">Add Product</button>
                <button class="tab-btn" data-tab="edit" onclick="switchTab('edit')">Edit / Delete</button>
            </div>

            <div class="tab-content active" id="tab-add">
                <form id="addProductForm" onsubmit="submitAdd(event)">
                    <div class="form-group">
                        <label for="newProductName">Name</label>
                        <input type="text" id="newProductName" required>
                    </div>
                    <div class="form-group">
                        <label for="newProductDesc">Description</label>
                        <input type="text" id="newProductDesc" placeholder="Amazing 3D print">
                    </div>
                    <div class="form-group">
                        <label for="newProductPrice">Price</label>
                        <input type="number" id="newProductPrice" min="0" step="0.01" required>
                    </div>
                    <div class="form-group">
                        <label for="newProductEmoji">Emoji</label>
                        <input type="text" id="newProductEmoji" placeholder="📦">
                    </div>
                    <div class="form-group">
                        <label for="newProductImages">Image URLs (one per line)</label>
                        <textarea id="newProductImages" rows="3"></textarea>
                    </div>
                    <div class="form-group">
                        <label for="newProductBadge">Badge</label>
                        <select id="newProductBadge">
                        {badges}
                        </select>
                    </div>
                    <div class="form-actions">
                        <button type="submit" class="btn">Add Product</button>
                    </div>
                </form>
            </div>

            <div class="tab-content" id="tab-edit">
                <div id="editProductsList">{edit_list}</div>
            </div>
        </div>
    </div>

    <div class="modal-overlay" id="editProductModal" onclick="if(event.target===this)closeEdit()">
        <div class="modal">
            <div class="modal-header">
                <h2>Edit Product</h2>
                <button class="modal-close" onclick="closeEdit()">&times;</button>
            </div>
            <form id="editProductForm" onsubmit="submitEdit(event)">
                <input type="hidden" id="editProductId">
                <div class="form-group">
                    <label for="editProductName">Name</label>
                    <input type="text" id="editProductName" required>
                </div>
                <div class="form-group">
                    <label for="editProductDesc">Description</label>
                    <input type="text" id="editProductDesc">
                </div>
                <div class="form-group">
                    <label for="editProductPrice">Price</label>
                    <input type="number" id="editProductPrice" min="0" step="0.01" required>
                </div>
                <div class="form-group">
                    <label for="editProductEmoji">Emoji</label>
                    <input type="text" id="editProductEmoji">
                </div>
                <div class="form-group">
                    <label for="editProductImages">Image URLs (one per line)</label>
                    <textarea id="editProductImages" rows="4"></textarea>
                </div>
                <div class="form-group">
                    <label for="editProductBadge">Badge</label>
                    <select id="editProductBadge">
                    {badges}
                    </select>
                </div>
                <div class="form-actions">
                    <button type="button" class="btn btn-danger" onclick="deleteProduct()">Delete</button>
                    <button type="submit" class="btn">Save</button>
                </div>
            </form>
        </div>
    </div>
    <script>{script}</script>"##,
        badges = BADGE_OPTIONS,
        edit_list = edit_list,
        script = ADMIN_SCRIPT,
    )
}

fn edit_item_html(product: &Product) -> String {
    let thumb = match product.primary_image() {
        Some(url) => format!(
            r#"<img src="{}" alt="{}">"#,
            html_escape(url),
            html_escape(&product.name)
        ),
        None => html_escape(product.visual_emoji()),
    };

    // The edit form is filled from this record, images as one URL per line.
    let record = serde_json::json!({
        "id": product.id,
        "name": product.name,
        "desc": product.desc,
        "price": product.price.to_string(),
        "emoji": product.emoji,
        "badge": product.badge.as_str(),
        "images": product.image_list().join("\n"),
    });

    format!(
        r#"<div class="edit-product-item" data-id="{id}" data-product="{record}" onclick="openEdit(this)">
            <div class="edit-product-thumb">{thumb}</div>
            <div class="edit-product-info">
                <h4>{name}</h4>
                <p>{price}</p>
            </div>
            <span class="edit-product-action">Edit &rarr;</span>
        </div>"#,
        id = product.id,
        record = html_escape(&record.to_string()),
        thumb = thumb,
        name = html_escape(&product.name),
        price = html_escape(&product.price_label()),
    )
}

const ADMIN_SCRIPT: &str = r#"
    function openAdmin() {
        document.getElementById('adminModal').classList.add('active');
    }

    function closeAdmin() {
        document.getElementById('adminModal').classList.remove('active');
    }

    function closeEdit() {
        document.getElementById('editProductModal').classList.remove('active');
    }

    function switchTab(tab) {
        document.querySelectorAll('.tab-btn').forEach(b => b.classList.toggle('active', b.dataset.tab === tab));
        document.querySelectorAll('.tab-content').forEach(c => c.classList.remove('active'));
        document.getElementById('tab-' + tab).classList.add('active');
    }

    function readFields(prefix) {
        const value = id => document.getElementById(prefix + id).value;
        return {
            name: value('Name'),
            desc: value('Desc'),
            price: value('Price'),
            emoji: value('Emoji'),
            badge: value('Badge'),
            images: value('Images')
        };
    }

    async function send(method, url, body) {
        const response = await fetch(url, {
            method,
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify(body)
        });
        if (!response.ok) {
            let message = response.statusText;
            try { message = (await response.json()).error || message; } catch (e) {}
            alert('Failed: ' + message);
            return false;
        }
        return true;
    }

    async function submitAdd(event) {
        event.preventDefault();
        if (await send('POST', '/api/admin/products', readFields('newProduct'))) {
            window.location.reload();
        }
    }

    function openEdit(item) {
        const product = JSON.parse(item.dataset.product);
        document.getElementById('editProductId').value = product.id;
        document.getElementById('editProductName').value = product.name;
        document.getElementById('editProductDesc').value = product.desc;
        document.getElementById('editProductPrice').value = product.price;
        document.getElementById('editProductEmoji').value = product.emoji || '';
        document.getElementById('editProductBadge').value = product.badge || '';
        document.getElementById('editProductImages').value = product.images;
        document.getElementById('editProductModal').classList.add('active');
    }

    async function submitEdit(event) {
        event.preventDefault();
        const id = document.getElementById('editProductId').value;
        if (await send('PUT', '/api/admin/products/' + id, readFields('editProduct'))) {
            window.location.reload();
        }
    }

    async function deleteProduct() {
        const id = document.getElementById('editProductId').value;
        if (!id || !confirm('Are you sure you want to delete this product?')) return;
        if (await send('DELETE', '/api/admin/products/' + id, { confirm: true })) {
            window.location.reload();
        }
    }
"#;

// ============================================================================
// Unlock Challenge
// ============================================================================

// Ctrl+Shift+L asks for the admin secret and remembers this device on success.
const UNLOCK_SCRIPT: &str = r#"
    document.addEventListener('keydown', async (e) => {
        if (!(e.ctrlKey && e.shiftKey && e.key === 'L')) return;
        const password = prompt('Admin Setup: Enter password to enable admin features on this device:');
        if (password === null) return;
        const response = await fetch('/api/admin/unlock', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ password })
        });
        if (response.ok) {
            alert('Device verified! Admin button is now visible.');
            window.location.reload();
        } else {
            alert('Wrong password');
        }
    });
"#;

// ============================================================================
// Base HTML Template
// ============================================================================

pub fn base_html(title: &str, content: &str, admin_panel: Option<&str>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
    {nav}
    <div class="container">
        {content}
    </div>
    {admin}
    <script>{unlock}</script>
</body>
</html>"#,
        title = html_escape(title),
        style = STYLE,
        nav = nav_bar(admin_panel.is_some()),
        content = content,
        admin = admin_panel.unwrap_or(""),
        unlock = UNLOCK_SCRIPT,
    )
}
