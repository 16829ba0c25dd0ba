use serde::{Deserialize, Serialize};

use crate::error::{AntakshariError, Result};

/// A film song as returned by the model.
///
/// Deserialization rejects objects with a missing, non-string or empty field,
/// so a `Song` always carries all three values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSong")]
pub struct Song {
    pub title: String,
    pub movie: String,
    /// Newline-joined lyric lines.
    pub lyrics: String,
}

#[derive(Deserialize)]
struct RawSong {
    title: String,
    movie: String,
    lyrics: String,
}

impl TryFrom<RawSong> for Song {
    type Error = String;

    fn try_from(raw: RawSong) -> std::result::Result<Self, Self::Error> {
        for (field, value) in [
            ("title", &raw.title),
            ("movie", &raw.movie),
            ("lyrics", &raw.lyrics),
        ] {
            if value.trim().is_empty() {
                return Err(format!("song field `{field}` is empty"));
            }
        }
        Ok(Song {
            title: raw.title,
            movie: raw.movie,
            lyrics: raw.lyrics,
        })
    }
}

impl Song {
    pub fn lyric_lines(&self) -> impl Iterator<Item = &str> {
        self.lyrics.lines().filter(|l| !l.trim().is_empty())
    }
}

/// The letter a user is asking songs for. Case is preserved as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongQuery(String);

impl SongQuery {
    pub fn new(letter: &str) -> Result<Self> {
        let letter = letter.trim();
        if letter.is_empty() {
            return Err(AntakshariError::InvalidQuery(
                "a starting letter is required".to_string(),
            ));
        }
        Ok(Self(letter.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SongQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Songs found for one letter; an empty list means nothing qualified.
#[derive(Debug, Clone, Serialize)]
pub struct SongList {
    pub letter: String,
    pub songs: Vec<Song>,
}

impl SongList {
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

// Gemini generateContent request format
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single user turn asking for JSON output shaped by `schema`.
    pub fn json(prompt: String, schema: serde_json::Value) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema),
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

// Gemini generateContent response format
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }

    /// Text of the first candidate, or `None` when the envelope carries none.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
impl GenerateContentResponse {
    /// Response carrying a single text part, as the service returns for JSON output.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: vec![Part {
                        text: Some(text.into()),
                    }],
                }),
                finish_reason: Some("STOP".to_string()),
            }],
            prompt_feedback: None,
        }
    }
}
