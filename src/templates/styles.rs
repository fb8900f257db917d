//! CSS styles for the storefront.
//!
//! Contains the main STYLE constant with all CSS for the web interface.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
/* Solarized Light Theme */
:root {
    --base01: #586e75;
    --base00: #657b83;
    --base1: #93a1a1;
    --base2: #eee8d5;
    --base3: #fdf6e3;

    --yellow: #b58900;
    --orange: #cb4b16;
    --red: #dc322f;
    --magenta: #d33682;
    --blue: #268bd2;
    --cyan: #2aa198;
    --green: #859900;

    --bg: var(--base3);
    --fg: var(--base00);
    --muted: var(--base1);
    --border: var(--base2);
    --link: var(--blue);
    --link-hover: var(--cyan);
    --accent: var(--base2);
    --card-bg: #f7f2e2;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.6;
    color: var(--fg);
    background: var(--bg);
}

.container {
    max-width: 1100px;
    margin: 0 auto;
    padding: 1rem;
}

a { color: var(--link); text-decoration: none; }
a:hover { color: var(--link-hover); text-decoration: underline; }

h1, h2, h3 { font-weight: 600; margin-top: 1.5em; margin-bottom: 0.5em; }
h1 { font-size: 1.5rem; }

.nav-bar {
    position: sticky;
    top: 0;
    background: var(--bg);
    border-bottom: 1px solid var(--border);
    padding: 0.5rem 1rem;
    display: flex;
    gap: 1rem;
    align-items: center;
    z-index: 100;
}

.nav-bar a, .nav-bar button { font-size: 0.9rem; }
.nav-bar .brand { font-weight: 700; color: var(--base01); }
.nav-bar .spacer { flex: 1; }

.nav-bar button {
    background: none;
    border: none;
    color: var(--link);
    cursor: pointer;
    font-family: inherit;
}
.nav-bar button:hover { color: var(--link-hover); text-decoration: underline; }

/* Product grid */
.products-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
    gap: 1.25rem;
    margin-top: 1rem;
}

.product-card {
    background: var(--card-bg);
    border: 1px solid var(--border);
    border-radius: 8px;
    overflow: hidden;
    display: flex;
    flex-direction: column;
    cursor: pointer;
}
.product-card.custom-card { cursor: default; }

.product-image { position: relative; aspect-ratio: 1 / 1; background: var(--accent); }
.product-placeholder {
    width: 100%;
    height: 100%;
    display: flex;
    flex-direction: column;
    align-items: center;
    justify-content: center;
    font-size: 3rem;
}
.product-placeholder p { font-size: 0.9rem; color: var(--muted); }
.product-placeholder img { width: 100%; height: 100%; object-fit: cover; }

.product-badge {
    position: absolute;
    top: 0.5rem;
    left: 0.5rem;
    background: var(--orange);
    color: var(--base3);
    font-size: 0.75rem;
    padding: 0.1rem 0.5rem;
    border-radius: 999px;
}
.product-badge.new { background: var(--green); }

.product-info { padding: 0.75rem 1rem 1rem; display: flex; flex-direction: column; flex: 1; }
.product-title { margin: 0; font-size: 1.05rem; color: var(--base01); }
.product-desc { font-size: 0.9rem; color: var(--muted); flex: 1; }
.product-footer { display: flex; justify-content: space-between; align-items: center; margin-top: 0.75rem; }
.product-price { font-weight: 700; color: var(--base01); }

.btn {
    display: inline-block;
    padding: 0.4rem 0.9rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: var(--accent);
    color: var(--fg);
    cursor: pointer;
    font-size: 0.9rem;
}
.btn:hover { border-color: var(--blue); text-decoration: none; }
.btn-small { padding: 0.25rem 0.6rem; font-size: 0.8rem; }
.btn-danger { color: var(--red); }

/* Product detail */
.product-detail { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; margin-top: 1rem; }
.gallery-main { aspect-ratio: 1 / 1; background: var(--accent); border-radius: 8px; overflow: hidden; }
.gallery-thumbs { display: flex; gap: 0.5rem; margin-top: 0.5rem; flex-wrap: wrap; }
.gallery-thumbs img { width: 64px; height: 64px; object-fit: cover; border-radius: 4px; cursor: pointer; }
.back-link { font-size: 0.9rem; }

.contact { margin-top: 3rem; padding-top: 1rem; border-top: 1px solid var(--border); }

.message { padding: 1rem; border-radius: 4px; margin: 1rem 0; }
.message.error { background: #fdf2f2; color: var(--red); }

/* Admin panel */
.admin-btn {
    position: fixed;
    bottom: 1.5rem;
    right: 1.5rem;
    width: 48px;
    height: 48px;
    border-radius: 50%;
    border: none;
    background: var(--blue);
    color: var(--base3);
    font-size: 1.4rem;
    cursor: pointer;
}

.modal-overlay {
    display: none;
    position: fixed;
    inset: 0;
    background: rgba(0, 43, 54, 0.4);
    z-index: 200;
    align-items: center;
    justify-content: center;
}
.modal-overlay.active { display: flex; }

.modal {
    background: var(--bg);
    border-radius: 8px;
    width: min(560px, 92vw);
    max-height: 88vh;
    overflow-y: auto;
    padding: 1rem 1.25rem 1.5rem;
}
.modal-header { display: flex; justify-content: space-between; align-items: center; }
.modal-header h2 { margin: 0; }
.modal-close { background: none; border: none; font-size: 1.5rem; cursor: pointer; color: var(--muted); }

.tabs { display: flex; gap: 0.5rem; margin: 1rem 0; }
.tab-btn { background: none; border: 1px solid var(--border); padding: 0.3rem 0.8rem; border-radius: 4px; cursor: pointer; }
.tab-btn.active { background: var(--accent); color: var(--base01); }
.tab-content { display: none; }
.tab-content.active { display: block; }

.form-group { margin-bottom: 0.75rem; display: flex; flex-direction: column; }
.form-group label { font-size: 0.85rem; color: var(--base01); }
.form-group input, .form-group select, .form-group textarea {
    padding: 0.4rem 0.6rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: var(--bg);
    color: var(--fg);
    font-family: inherit;
}
.form-actions { display: flex; gap: 0.5rem; justify-content: flex-end; }

.edit-product-item {
    display: flex;
    align-items: center;
    gap: 0.75rem;
    padding: 0.5rem 0;
    border-bottom: 1px solid var(--border);
    cursor: pointer;
}
.edit-product-thumb { width: 40px; height: 40px; display: flex; align-items: center; justify-content: center; font-size: 1.5rem; }
.edit-product-thumb img { width: 40px; height: 40px; object-fit: cover; border-radius: 4px; }
.edit-product-info { flex: 1; }
.edit-product-info h4 { margin: 0; font-size: 0.95rem; }
.edit-product-info p { font-size: 0.8rem; color: var(--muted); }
.edit-product-action { font-size: 0.8rem; color: var(--link); }

@media (max-width: 700px) {
    .product-detail { grid-template-columns: 1fr; }
}
"#;
