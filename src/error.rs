//! Error types for a3s-triage

use thiserror::Error;

/// Errors that can occur while masking and classifying email
#[derive(Debug, Error)]
pub enum TriageError {
    /// Request body is absent or not a string
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Persisted model artifact is missing, unreadable, or corrupt
    #[error("Model unavailable at '{path}': {reason}")]
    ModelUnavailable { path: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// Bind or serve failure
    #[error("Server error: {0}")]
    Server(String),
}

impl TriageError {
    pub(crate) fn model_unavailable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for triage operations
pub type Result<T> = std::result::Result<T, TriageError>;

impl From<TriageError> for axum::response::Response {
    fn from(err: TriageError) -> Self {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let status = match &err {
            TriageError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TriageError::ModelUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({ "error": err.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl axum::response::IntoResponse for TriageError {
    fn into_response(self) -> axum::response::Response {
        self.into()
    }
}
