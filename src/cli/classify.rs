use std::path::PathBuf;
use std::sync::Arc;

use crate::config::TriageConfig;
use crate::error::Result;
use crate::model::{CategoryPredictor, ModelHandle};
use crate::pipeline::Pipeline;

/// Execute the `classify` command: run the full pipeline once and print JSON.
///
/// Unlike `serve`, a missing model is a hard error here.
pub fn execute(
    config: TriageConfig,
    text: Option<String>,
    model: Option<PathBuf>,
    remap_labels: bool,
) -> Result<()> {
    let model_path = model.unwrap_or(config.model_path);
    let handle = ModelHandle::load(&model_path)?;
    let predictor = CategoryPredictor::new(Arc::new(handle))
        .with_remap_labels(remap_labels || config.remap_labels);

    let text = super::read_input(text)?;
    let result = Pipeline::new(Arc::new(predictor)).classify(&text)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
