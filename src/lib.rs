pub mod classify;
pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod models;
pub mod parser;
pub mod prompt;
pub mod transport;

use std::sync::Arc;

use crate::client::{SongSource, StructuredGenerationClient};
use crate::config::Config;
use crate::credential::{CredentialProvider, EnvCredential};
use crate::error::Result;
use crate::models::SongList;
use crate::transport::{GeminiTransport, Transport};

pub struct SongService {
    source: Arc<dyn SongSource>,
}

impl SongService {
    pub fn new(cfg: &Config) -> Result<Self> {
        let transport = Arc::new(GeminiTransport::new(
            cfg.gemini.base_url.clone(),
            cfg.request_timeout(),
        )?);
        let credentials = Arc::new(EnvCredential::new(cfg.gemini.api_key_env.clone()));

        let client = StructuredGenerationClient::new(
            transport as Arc<dyn Transport>,
            credentials as Arc<dyn CredentialProvider>,
            cfg.gemini.model.clone(),
            cfg.songs.clone(),
        );

        Ok(Self::with_source(Arc::new(client)))
    }

    pub fn with_source(source: Arc<dyn SongSource>) -> Self {
        Self { source }
    }

    pub async fn songs_for(&self, letter: &str) -> Result<SongList> {
        let songs = self.source.fetch_songs_by_letter(letter).await?;
        Ok(SongList {
            letter: letter.trim().to_string(),
            songs,
        })
    }
}
