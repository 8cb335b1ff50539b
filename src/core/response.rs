//! Gemini wire types and response normalization
//!
//! The model answers in free-form text. When an explanation was asked for,
//! that text should be JSON, but it often arrives wrapped in markdown code
//! fences or not as JSON at all. Normalization never fails on that account:
//! it degrades to the raw text with a placeholder explanation.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::request::CorrectionResult;
use crate::error::{PolishError, PolishResult};

pub const EXPLANATION_FALLBACK: &str = "Could not parse explanation.";
pub const REMOTE_ERROR_FALLBACK: &str = "Failed to fetch from Gemini API";

const FENCE_WITH_TAG: &str = "```json";
const FENCE: &str = "```";

/// Body of a `generateContent` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.into()),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Success body. Every level is optional because the service does not
/// guarantee the shape.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

/// Error body returned with a non-success status
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// The object the model is asked to produce when explaining
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExplainedPayload {
    corrected_text: String,
    #[serde(default)]
    explanation: Option<String>,
}

/// Pull the message out of an error body, or the generic fallback
pub fn remote_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|detail| detail.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| REMOTE_ERROR_FALLBACK.to_string())
}

/// First candidate's first part's text, trimmed
pub fn extract_text(body: &str) -> PolishResult<String> {
    let response: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        debug!("Success body is not JSON: {}", e);
        PolishError::UnexpectedResponseFormat
    })?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .map(|text| text.trim().to_string())
        .ok_or(PolishError::UnexpectedResponseFormat)
}

/// Remove markdown code fence markers anywhere in the text
pub fn strip_code_fences(text: &str) -> String {
    text.replace(FENCE_WITH_TAG, "")
        .replace(FENCE, "")
        .trim()
        .to_string()
}

/// Turn the model's raw text into a result
pub fn normalize(raw: &str, explain: bool) -> CorrectionResult {
    if !explain {
        return CorrectionResult::plain(raw);
    }

    let json = strip_code_fences(raw);
    match serde_json::from_str::<ExplainedPayload>(&json) {
        Ok(payload) => CorrectionResult {
            corrected_text: payload.corrected_text,
            explanation: payload.explanation,
        },
        Err(e) => {
            warn!("⚠️ Failed to parse explanation JSON, using raw text: {}", e);
            CorrectionResult::explained(raw, EXPLANATION_FALLBACK)
        }
    }
}
