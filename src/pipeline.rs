//! Mask-then-classify pipeline
//!
//! The predictor only ever sees the masked text. If masking or prediction
//! fails the whole call fails; there is no masking-only fallback.

use std::sync::Arc;
use std::time::Instant;

use crate::error::Result;
use crate::masking::MaskingEngine;
use crate::model::Predictor;
use crate::types::{ClassificationResult, MaskingResult};

/// Composes the masking engine with a category predictor
#[derive(Clone)]
pub struct Pipeline {
    engine: MaskingEngine,
    predictor: Arc<dyn Predictor>,
}

impl Pipeline {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self {
            engine: MaskingEngine::new(),
            predictor,
        }
    }

    pub fn predictor(&self) -> &Arc<dyn Predictor> {
        &self.predictor
    }

    /// Mask PII without classifying
    pub fn mask(&self, text: &str) -> MaskingResult {
        self.engine.mask(text)
    }

    /// Mask PII in `original_email`, then classify the masked text
    pub fn classify(&self, original_email: &str) -> Result<ClassificationResult> {
        let started = Instant::now();
        let MaskingResult {
            masked_text,
            entities,
        } = self.engine.mask(original_email);

        let category = self.predictor.predict(&masked_text)?;

        tracing::debug!(
            entities = entities.len(),
            category = %category,
            elapsed_us = started.elapsed().as_micros() as u64,
            "Classified email"
        );

        Ok(ClassificationResult {
            input_email_body: original_email.to_string(),
            list_of_masked_entities: entities,
            masked_email: masked_text,
            category_of_the_email: category,
        })
    }
}
