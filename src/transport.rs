use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::credential::Credential;
use crate::error::{AntakshariError, Result};
use crate::models::{GenerateContentRequest, GenerateContentResponse};

pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// A failure exactly as the remote side (or the network) reported it.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct RemoteFailure {
    pub status: Option<u16>,
    pub message: String,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn generate(
        &self,
        credential: &Credential,
        model: &str,
        req: &GenerateContentRequest,
    ) -> std::result::Result<GenerateContentResponse, RemoteFailure>;
}

/// Talks to the Gemini `generateContent` endpoint. One attempt per call.
pub struct GeminiTransport {
    client: Client,
    base_url: String,
}

impl GeminiTransport {
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            AntakshariError::Config(format!("Failed to build HTTP client: {e}"))
        })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl Transport for GeminiTransport {
    async fn generate(
        &self,
        credential: &Credential,
        model: &str,
        req: &GenerateContentRequest,
    ) -> std::result::Result<GenerateContentResponse, RemoteFailure> {
        let url = self.endpoint(model);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", credential.expose())
            .header("Content-Type", "application/json")
            .json(req)
            .send()
            .await
            .map_err(|e| RemoteFailure {
                status: e.status().map(|s| s.as_u16()),
                message: format!("Failed to send request to Gemini API: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RemoteFailure {
                status: Some(status.as_u16()),
                message: format!("Gemini API error ({status}): {body}"),
            });
        }

        response.json().await.map_err(|e| RemoteFailure {
            status: Some(status.as_u16()),
            message: format!("Failed to parse Gemini API response: {e}"),
        })
    }
}
