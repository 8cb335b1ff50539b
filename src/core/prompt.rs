//! Prompt construction
//!
//! Deterministic: the same request always yields the same prompt.

use super::request::CorrectionRequest;

/// Build the instruction sent to the model for a request
pub fn build_prompt(request: &CorrectionRequest) -> String {
    let mut prompt = format!(
        "Please correct the grammar, spelling, and punctuation of the following text.\n\nTone: {}\n",
        request.tone()
    );

    if request.explain() {
        prompt.push_str("Also provide a brief explanation of the major changes made.\n");
        prompt.push_str(
            r#"Return the result as a VALID JSON object with the following structure: { "correctedText": "...", "explanation": "..." }."#,
        );
        prompt.push('\n');
    } else {
        prompt.push_str(
            "Return ONLY the corrected text. Do not add any markdown formatting unless asked.\n",
        );
    }

    prompt.push_str("Here is the text:\n\n");
    prompt.push_str(request.text());
    prompt
}
