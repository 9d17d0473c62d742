//! Linear classifier over TF-IDF features

use serde::{Deserialize, Serialize};

use super::vectorizer::SparseVector;

/// Fitted linear (logistic regression) classifier
///
/// Binary models carry one coefficient row for two classes; multinomial
/// models carry one row per class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

impl LinearClassifier {
    fn is_binary(&self) -> bool {
        self.classes.len() == 2 && self.coef.len() == 1
    }

    /// Check shapes against the vectorizer dimension
    pub fn validate(&self, dimension: usize) -> std::result::Result<(), String> {
        if self.classes.is_empty() {
            return Err("classifier has no classes".to_string());
        }
        if self.coef.len() != self.classes.len() && !self.is_binary() {
            return Err(format!(
                "{} coefficient rows for {} classes",
                self.coef.len(),
                self.classes.len()
            ));
        }
        if self.intercept.len() != self.coef.len() {
            return Err(format!(
                "{} intercepts for {} coefficient rows",
                self.intercept.len(),
                self.coef.len()
            ));
        }
        if let Some(row) = self.coef.iter().position(|r| r.len() != dimension) {
            return Err(format!(
                "coefficient row {row} has {} columns, expected {dimension}",
                self.coef[row].len()
            ));
        }
        Ok(())
    }

    /// Raw decision scores, one per coefficient row
    pub fn decision_function(&self, features: &SparseVector) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| {
                features
                    .iter()
                    .filter_map(|(idx, w)| row.get(*idx).map(|c| c * w))
                    .sum::<f64>()
                    + b
            })
            .collect()
    }

    /// Predict the label for one feature vector
    pub fn predict(&self, features: &SparseVector) -> &str {
        let scores = self.decision_function(features);

        let index = if self.is_binary() {
            usize::from(scores.first().is_some_and(|s| *s > 0.0))
        } else {
            // first maximum wins on ties
            scores
                .iter()
                .enumerate()
                .fold(None, |best: Option<(usize, f64)>, (i, &s)| match best {
                    Some((_, b)) if b >= s => best,
                    _ => Some((i, s)),
                })
                .map(|(i, _)| i)
                .unwrap_or(0)
        };

        self.classes.get(index).map(String::as_str).unwrap_or_default()
    }
}
