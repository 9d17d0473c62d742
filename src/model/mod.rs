//! Category prediction from a pre-trained text model
//!
//! The model artifact is a JSON file holding a fitted TF-IDF vectorizer and a
//! fitted linear classifier. It is loaded once, before any request is served,
//! and shared read-only behind an `Arc` afterwards.

pub mod classifier;
pub mod labels;
pub mod vectorizer;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TriageError};
pub use classifier::LinearClassifier;
pub use labels::map_prediction;
pub use vectorizer::{SparseVector, TfidfVectorizer};

/// Anything that turns email text into a category label
///
/// Implementations are shared across concurrent requests and must not
/// mutate state in `predict`.
pub trait Predictor: Send + Sync {
    fn predict(&self, text: &str) -> Result<String>;

    /// Whether a model is actually loaded behind this predictor
    fn is_available(&self) -> bool {
        true
    }

    /// The loaded model, if any
    fn model(&self) -> Option<&ModelHandle> {
        None
    }
}

/// On-disk model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub vectorizer: TfidfVectorizer,
    pub classifier: LinearClassifier,
}

impl ModelArtifact {
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.vectorizer.validate()?;
        self.classifier.validate(self.vectorizer.dimension())
    }
}

/// A loaded, validated model; read-only once constructed
#[derive(Debug)]
pub struct ModelHandle {
    artifact: ModelArtifact,
    source: PathBuf,
    loaded_at: DateTime<Utc>,
}

impl ModelHandle {
    /// Load and validate the artifact at `path`
    ///
    /// Any failure (missing file, unreadable bytes, malformed JSON,
    /// inconsistent shapes) is reported as `ModelUnavailable`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let bytes = std::fs::read(path)
            .map_err(|e| TriageError::model_unavailable(&path_str, e.to_string()))?;
        let artifact: ModelArtifact = serde_json::from_slice(&bytes)
            .map_err(|e| TriageError::model_unavailable(&path_str, e.to_string()))?;

        let handle = Self::from_artifact(artifact, path)?;
        tracing::info!(
            path = %path.display(),
            classes = handle.artifact.classifier.classes.len(),
            features = handle.artifact.vectorizer.dimension(),
            "Loaded classification model"
        );
        Ok(handle)
    }

    /// Wrap an in-memory artifact, validating its shapes
    pub fn from_artifact(artifact: ModelArtifact, source: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        artifact
            .validate()
            .map_err(|reason| TriageError::model_unavailable(source.display().to_string(), reason))?;
        Ok(Self {
            artifact,
            source,
            loaded_at: Utc::now(),
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.artifact.classifier.classes
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Vectorize one document, then classify it
    pub fn predict_raw(&self, text: &str) -> String {
        let features = self.artifact.vectorizer.transform(text);
        self.artifact.classifier.predict(&features).to_string()
    }
}

/// Predictor backed by a loaded model handle
#[derive(Debug, Clone)]
pub struct CategoryPredictor {
    model: Arc<ModelHandle>,
    remap_labels: bool,
}

impl CategoryPredictor {
    pub fn new(model: Arc<ModelHandle>) -> Self {
        Self {
            model,
            remap_labels: false,
        }
    }

    /// Report display names (see [`map_prediction`]) instead of raw labels
    pub fn with_remap_labels(mut self, remap: bool) -> Self {
        self.remap_labels = remap;
        self
    }
}

impl Predictor for CategoryPredictor {
    fn predict(&self, text: &str) -> Result<String> {
        let raw = self.model.predict_raw(text);
        if self.remap_labels {
            Ok(map_prediction(&raw))
        } else {
            Ok(raw)
        }
    }

    fn model(&self) -> Option<&ModelHandle> {
        Some(&self.model)
    }
}

/// Stand-in used when the model failed to load at startup
///
/// Every prediction fails with the original load error.
#[derive(Debug, Clone)]
pub struct UnavailablePredictor {
    path: String,
    reason: String,
}

impl UnavailablePredictor {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build from a load failure, keeping its message
    pub fn from_error(path: impl Into<String>, err: &TriageError) -> Self {
        match err {
            TriageError::ModelUnavailable { path, reason } => Self::new(path.clone(), reason.clone()),
            other => Self::new(path, other.to_string()),
        }
    }
}

impl Predictor for UnavailablePredictor {
    fn predict(&self, _text: &str) -> Result<String> {
        Err(TriageError::model_unavailable(&self.path, &self.reason))
    }

    fn is_available(&self) -> bool {
        false
    }
}
