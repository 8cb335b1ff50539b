//! Correction request and result types

use serde::Serialize;

use super::tone::Tone;
use crate::error::{PolishError, PolishResult};

/// A single user action asking for a correction.
///
/// The text is stored trimmed and is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionRequest {
    text: String,
    tone: Tone,
    explain: bool,
}

impl CorrectionRequest {
    pub fn new(text: &str, tone: Tone, explain: bool) -> PolishResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PolishError::InvalidInput);
        }
        Ok(Self {
            text: text.to_string(),
            tone,
            explain,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn explain(&self) -> bool {
        self.explain
    }
}

/// What the display layer receives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionResult {
    pub corrected_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl CorrectionResult {
    pub fn plain(corrected_text: impl Into<String>) -> Self {
        Self {
            corrected_text: corrected_text.into(),
            explanation: None,
        }
    }

    pub fn explained(corrected_text: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            corrected_text: corrected_text.into(),
            explanation: Some(explanation.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_trims_text() {
        let req = CorrectionRequest::new("  helo wrld \n", Tone::Neutral, false).unwrap();
        assert_eq!(req.text(), "helo wrld");
        assert_eq!(req.tone(), Tone::Neutral);
        assert!(!req.explain());
    }

    #[test]
    fn test_request_rejects_blank_text() {
        assert!(matches!(
            CorrectionRequest::new("", Tone::Formal, true),
            Err(PolishError::InvalidInput)
        ));
        assert!(matches!(
            CorrectionRequest::new(" \t\n ", Tone::Formal, true),
            Err(PolishError::InvalidInput)
        ));
    }

    #[test]
    fn test_result_json_shape() {
        let plain = serde_json::to_string(&CorrectionResult::plain("Hi.")).unwrap();
        assert_eq!(plain, r#"{"correctedText":"Hi."}"#);

        let explained =
            serde_json::to_string(&CorrectionResult::explained("Hi.", "Capitalized.")).unwrap();
        assert_eq!(
            explained,
            r#"{"correctedText":"Hi.","explanation":"Capitalized."}"#
        );
    }
}
