//! Interactive page for trying the classifier from a browser

use axum::response::Html;

const INDEX_HTML: &str = include_str!("ui/index.html");

/// GET / — single page that posts to /classify and renders the result
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
