//! Correction pipeline
//!
//! Request → prompt → transport → normalized result. Each call makes at
//! most one HTTP request and never retries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::gemini::{GeminiTransport, Transport};
use super::prompt::build_prompt;
use super::request::{CorrectionRequest, CorrectionResult};
use super::response::{extract_text, normalize, remote_error_message, GenerateContentRequest};
use super::tone::Tone;
use crate::config::Config;
use crate::credential::Credential;
use crate::error::{PolishError, PolishResult};

/// Runs corrections against a transport, one at a time
pub struct Corrector {
    transport: Arc<dyn Transport>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the request finishes, however it ends
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Corrector {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Corrector talking to the configured Gemini endpoint
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(GeminiTransport::new(config)))
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Correct `text` in the given tone, optionally asking for an explanation
    pub async fn correct(
        &self,
        text: &str,
        credential: Option<&Credential>,
        tone: Tone,
        explain: bool,
    ) -> PolishResult<CorrectionResult> {
        let request = CorrectionRequest::new(text, tone, explain)?;
        let credential = credential.ok_or(PolishError::MissingCredential)?;
        self.run(&request, credential).await
    }

    /// Same as [`Corrector::correct`] for an already validated request
    pub async fn run(
        &self,
        request: &CorrectionRequest,
        credential: &Credential,
    ) -> PolishResult<CorrectionResult> {
        let _guard = self.acquire()?;

        let prompt = build_prompt(request);
        debug!("🧠 Prompt ({} chars, tone={})", prompt.len(), request.tone());

        let reply = self
            .transport
            .generate(&GenerateContentRequest::from_prompt(prompt), credential)
            .await?;

        if !reply.is_success() {
            let message = remote_error_message(&reply.body);
            warn!("❌ {} API error ({}): {}", self.transport.name(), reply.status, message);
            return Err(PolishError::RemoteService(message));
        }

        let raw = extract_text(&reply.body)?;
        debug!("🧠 Raw model output: {}", raw);

        let result = normalize(&raw, request.explain());
        info!(
            "✅ Correction ready ({} chars, explanation: {})",
            result.corrected_text.chars().count(),
            result.explanation.is_some()
        );
        Ok(result)
    }

    fn acquire(&self) -> PolishResult<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| PolishError::Busy)?;
        Ok(InFlightGuard(&self.in_flight))
    }
}
