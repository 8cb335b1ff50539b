//! Rendering results for the terminal

use crate::core::CorrectionResult;
use crate::error::PolishError;

/// Human-readable rendering of a result.
///
/// The explanation section only appears when it was asked for.
pub fn render(result: &CorrectionResult, explain: bool) -> String {
    let mut out = result.corrected_text.clone();
    if let (true, Some(explanation)) = (explain, result.explanation.as_deref()) {
        out.push_str("\n\nExplanation:\n");
        out.push_str(explanation);
    }
    out
}

/// JSON rendering of a result
pub fn render_json(result: &CorrectionResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

pub fn render_error(err: &PolishError) -> String {
    format!("Error: {}", err)
}

/// Character counter shown under the input
pub fn char_count(text: &str) -> String {
    format!("{} chars", text.chars().count())
}
