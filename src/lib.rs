//! # a3s-triage
//!
//! PII masking and support-category classification for inbound email.
//!
//! ## Overview
//!
//! `a3s-triage` finds personal data in a free-text email body (card numbers,
//! national IDs, phone numbers, email addresses, names, ...), replaces each
//! span with a placeholder such as `[email]`, and reports where every masked
//! value was. The masked text is then fed to a pre-trained TF-IDF + linear
//! classifier that picks the support category.
//!
//! ## Quick Start
//!
//! ```rust
//! use a3s_triage::{mask_pii, PiiCategory};
//!
//! let result = mask_pii("My name is John Smith, call 9876543210");
//! assert_eq!(result.masked_text, "My name is [full_name], call [phone_number]");
//! assert_eq!(result.entities[0].category, PiiCategory::PhoneNumber);
//! assert_eq!(result.entities[1].value, "John Smith");
//! ```
//!
//! ## Architecture
//!
//! - **MaskingEngine** — fixed rule set, compiled once, deterministic output
//! - **Predictor** trait — text to label; `CategoryPredictor` wraps a loaded model
//! - **Pipeline** — mask, then classify the masked text
//! - **server** — axum endpoints (`/classify`, `/mask`, `/health`) and the
//!   interactive page at `/`

pub mod cli;
pub mod config;
pub mod error;
pub mod masking;
pub mod model;
pub mod pipeline;
pub mod server;
pub mod types;

// Re-export core types
pub use config::TriageConfig;
pub use error::{Result, TriageError};
pub use masking::{mask_pii, MaskingEngine};
pub use model::{
    map_prediction, CategoryPredictor, ModelArtifact, ModelHandle, Predictor, UnavailablePredictor,
};
pub use pipeline::Pipeline;
pub use types::{ClassificationResult, DetectedEntity, MaskingResult, PiiCategory};
