use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::TriageConfig;
use crate::pipeline::Pipeline;

/// Shared application state accessible to all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub config: Arc<TriageConfig>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(pipeline: Pipeline, config: Arc<TriageConfig>) -> Self {
        Self {
            pipeline,
            config,
            started_at: Utc::now(),
        }
    }
}
