//! TF-IDF feature extraction
//!
//! Reads the fitted state of a word n-gram TF-IDF vectorizer and applies it to
//! a single document. Tokenization follows the usual `\b\w\w+\b` convention:
//! lowercase, words of two or more characters, stop words dropped before
//! n-grams are formed.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Sparse feature vector: (column index, weight), sorted by index
pub type SparseVector = Vec<(usize, f64)>;

fn token_pattern() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| match Regex::new(r"\b\w\w+\b") {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::error!(error = %e, "Failed to compile token pattern");
            None
        }
    })
    .as_ref()
}

/// Fitted TF-IDF vectorizer state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term (unigram or space-joined n-gram) to column index
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per column
    pub idf: Vec<f64>,

    /// Inclusive (min_n, max_n)
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    #[serde(default)]
    pub stop_words: HashSet<String>,

    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// Use `1 + ln(tf)` instead of raw counts
    #[serde(default)]
    pub sublinear_tf: bool,

    /// "l2" or "none"
    #[serde(default = "default_norm")]
    pub norm: String,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_true() -> bool {
    true
}

fn default_norm() -> String {
    "l2".to_string()
}

impl TfidfVectorizer {
    /// Number of feature columns
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Check the fitted state is internally consistent
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(format!(
                "idf has {} entries but vocabulary has {} terms",
                self.idf.len(),
                self.vocabulary.len()
            ));
        }
        if let Some((term, idx)) = self
            .vocabulary
            .iter()
            .find(|(_, idx)| **idx >= self.idf.len())
        {
            return Err(format!("term '{term}' maps to out-of-range column {idx}"));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram_range ({min_n}, {max_n})"));
        }
        if self.norm != "l2" && self.norm != "none" {
            return Err(format!("unsupported norm '{}'", self.norm));
        }
        Ok(())
    }

    /// Split a document into analyzed tokens
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let Some(pattern) = token_pattern() else {
            return Vec::new();
        };
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        pattern
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }

    /// Word n-grams for `tokens` within the configured range
    pub fn ngrams(&self, tokens: &[String]) -> Vec<String> {
        let (min_n, max_n) = self.ngram_range;
        let mut grams = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            grams.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        grams
    }

    /// Transform one document into a TF-IDF weighted sparse vector
    ///
    /// Terms whose column has no idf entry are skipped; [`validate`](Self::validate)
    /// rejects such state up front.
    pub fn transform(&self, text: &str) -> SparseVector {
        let tokens = self.tokenize(text);
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for gram in self.ngrams(&tokens) {
            if let Some(&idx) = self.vocabulary.get(&gram) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut features: SparseVector = counts
            .into_iter()
            .filter_map(|(idx, tf)| {
                let idf = self.idf.get(idx)?;
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                Some((idx, tf * idf))
            })
            .collect();
        features.sort_by_key(|(idx, _)| *idx);

        if self.norm == "l2" {
            let norm = features.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, w) in &mut features {
                    *w /= norm;
                }
            }
        }

        features
    }
}
