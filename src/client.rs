use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::config::SongsConfig;
use crate::credential::CredentialProvider;
use crate::error::{AntakshariError, Result};
use crate::models::{GenerateContentRequest, Song, SongQuery};
use crate::parser;
use crate::prompt::{song_prompt, song_schema};
use crate::transport::Transport;

/// Asks the generative service for schema-shaped JSON and returns typed records.
///
/// Stateless between calls: the credential is resolved, the request sent and
/// the reply parsed afresh each time, so concurrent calls never interact.
pub struct StructuredGenerationClient {
    tx: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialProvider>,
    model: String,
    songs: SongsConfig,
}

impl StructuredGenerationClient {
    pub fn new(
        tx: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialProvider>,
        model: String,
        songs: SongsConfig,
    ) -> Self {
        Self {
            tx,
            credentials,
            model,
            songs,
        }
    }

    /// One request, one attempt. No text in the reply is an empty result.
    pub async fn generate_records<T: DeserializeOwned>(
        &self,
        prompt: String,
        schema: Value,
    ) -> Result<Vec<T>> {
        let credential = self
            .credentials
            .resolve()
            .ok_or_else(|| AntakshariError::MissingCredential(self.credentials.source()))?;

        let request = GenerateContentRequest::json(prompt, schema);
        let response = self
            .tx
            .generate(&credential, &self.model, &request)
            .await
            .map_err(AntakshariError::from)?;

        let text = response.text();
        if text.is_none() {
            let block_reason = response
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref());
            tracing::info!(
                "Gemini returned no text payload (block reason: {}, finish reason: {})",
                block_reason.unwrap_or("none"),
                response.finish_reason().unwrap_or("none")
            );
        }
        parser::parse_records(text.as_deref())
    }
}

#[async_trait]
pub trait SongSource: Send + Sync {
    async fn fetch_songs_by_letter(&self, letter: &str) -> Result<Vec<Song>>;
}

#[async_trait]
impl SongSource for StructuredGenerationClient {
    async fn fetch_songs_by_letter(&self, letter: &str) -> Result<Vec<Song>> {
        let query = SongQuery::new(letter)?;
        tracing::info!("Fetching songs for letter {} with {}", query, self.model);

        let result = self
            .generate_records::<Song>(song_prompt(&query, &self.songs), song_schema(&self.songs))
            .await;

        match &result {
            Ok(songs) => tracing::info!("Found {} song(s) for letter {}", songs.len(), query),
            Err(e) => tracing::error!(kind = ?e.kind(), "Song query for letter {} failed: {}", query, e),
        }
        result
    }
}
