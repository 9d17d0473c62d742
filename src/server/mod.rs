pub mod api;
pub mod router;
pub mod state;
pub mod ui;

use std::sync::Arc;

use crate::config::TriageConfig;
use crate::error::{Result, TriageError};
use crate::model::{CategoryPredictor, ModelHandle, Predictor, UnavailablePredictor};
use crate::pipeline::Pipeline;

/// Load the model once and wrap it as the shared predictor.
///
/// A failed load does not stop the server: /mask keeps working and every
/// /classify call reports the load failure.
pub fn build_predictor(config: &TriageConfig) -> Arc<dyn Predictor> {
    match ModelHandle::load(&config.model_path) {
        Ok(handle) => Arc::new(
            CategoryPredictor::new(Arc::new(handle)).with_remap_labels(config.remap_labels),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Model unavailable, classification requests will fail");
            Arc::new(UnavailablePredictor::from_error(
                config.model_path.display().to_string(),
                &e,
            ))
        }
    }
}

/// Start the HTTP server with the given configuration.
pub async fn start(config: TriageConfig) -> Result<()> {
    // Load before binding so no request can observe a half-loaded model
    let predictor = build_predictor(&config);

    let bind_addr = config.bind_address();
    let app_state = state::AppState::new(Pipeline::new(predictor), Arc::new(config));

    let app = router::build(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| TriageError::Server(format!("Failed to bind to {bind_addr}: {e}")))?;

    tracing::info!("Server listening on {bind_addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| TriageError::Server(format!("Server error: {e}")))?;

    Ok(())
}
