use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::state::AppState;
use super::{api, ui};

/// Build the complete axum Router with the API and the interactive page.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index))
        .route("/classify", post(api::classify))
        .route("/mask", post(api::mask))
        .route("/health", get(api::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
