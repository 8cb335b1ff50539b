//! Gemini transport
//!
//! One POST to `generateContent`, credential in the query string. The
//! transport only moves bytes; interpreting status and body is the
//! pipeline's job.

use async_trait::async_trait;
use tracing::debug;

use super::response::GenerateContentRequest;
use crate::config::Config;
use crate::credential::Credential;
use crate::error::PolishResult;

/// Status and body of an HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReply {
    pub status: u16,
    pub body: String,
}

impl TransportReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for anything that can carry a generate request to the service
#[async_trait]
pub trait Transport: Send + Sync {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
        credential: &Credential,
    ) -> PolishResult<TransportReply>;

    /// Get the transport name
    fn name(&self) -> &str;
}

/// reqwest-backed transport for the public endpoint
#[derive(Clone)]
pub struct GeminiTransport {
    client: reqwest::Client,
    api_base: String,
    model: String,
}

impl GeminiTransport {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    pub fn endpoint(&self, credential: &Credential) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.api_base,
            self.model,
            urlencoding::encode(credential.expose())
        )
    }
}

#[async_trait]
impl Transport for GeminiTransport {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
        credential: &Credential,
    ) -> PolishResult<TransportReply> {
        debug!("📤 POST {}/{}:generateContent", self.api_base, self.model);

        // .json() sets Content-Type: application/json
        let response = self
            .client
            .post(self.endpoint(credential))
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("📥 Gemini replied {} ({} bytes)", status, body.len());

        Ok(TransportReply { status, body })
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
