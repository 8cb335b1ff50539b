//! Mock Gemini transport for testing
//!
//! Replies with a canned status and body, and records every request.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use polish::core::gemini::{Transport, TransportReply};
use polish::core::response::GenerateContentRequest;
use polish::credential::Credential;
use polish::PolishResult;

/// One request as the service would have seen it
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub key: String,
}

#[derive(Debug)]
pub struct MockTransport {
    reply: TransportReply,
    /// All requests that reached the "network"
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
    /// When set, each request waits here before replying
    pub gate: Option<Arc<Notify>>,
}

impl MockTransport {
    pub fn replying(status: u16, body: impl Into<String>) -> Self {
        Self {
            reply: TransportReply {
                status,
                body: body.into(),
            },
            calls: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    /// Successful reply whose first part carries `text`
    pub fn with_text(text: &str) -> Self {
        let body = serde_json::json!({
            "candidates": [ { "content": { "parts": [ { "text": text } ], "role": "model" } } ]
        });
        Self::replying(200, body.to_string())
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
        credential: &Credential,
    ) -> PolishResult<TransportReply> {
        let prompt = request
            .contents
            .first()
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.clone())
            .unwrap_or_default();
        self.calls.lock().unwrap().push(RecordedCall {
            prompt,
            key: credential.expose().to_string(),
        });

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
