use crate::error::Result;
use crate::masking::MaskingEngine;

/// Execute the `mask` command: print the masking result as JSON.
pub fn execute(text: Option<String>) -> Result<()> {
    let text = super::read_input(text)?;
    let result = MaskingEngine::new().mask(&text);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
