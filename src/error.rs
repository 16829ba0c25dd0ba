use thiserror::Error;

/// Maximum number of characters of offending model output kept in a format error.
pub const EXCERPT_LIMIT: usize = 200;

/// Stable classification of every failure a song query can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingCredential,
    Authorization,
    InvalidRequest,
    Format,
    Transport,
    InvalidQuery,
    Config,
}

#[derive(Debug, Error)]
pub enum AntakshariError {
    #[error("no credential configured (expected in ${0})")]
    MissingCredential(String),

    #[error("access denied by the generative service: {0}")]
    Authorization(String),

    #[error("remote session or resource invalid: {0}")]
    InvalidRequest(String),

    #[error("model output is not a JSON array of songs: {excerpt}")]
    Format { excerpt: String },

    #[error("generative service call failed: {0}")]
    Transport(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AntakshariError {
    /// Build a format error from the raw text, keeping only a bounded excerpt.
    pub fn format(raw: &str) -> Self {
        Self::Format {
            excerpt: excerpt(raw, EXCERPT_LIMIT),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential(_) => ErrorKind::MissingCredential,
            Self::Authorization(_) => ErrorKind::Authorization,
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Self::Format { .. } => ErrorKind::Format,
            Self::Transport(_) => ErrorKind::Transport,
            Self::InvalidQuery(_) => ErrorKind::InvalidQuery,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Remediation text for the presentation layer.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingCredential(var) => format!(
                "Configuration Error: no credential configured. Set {var} in the environment or a .env file."
            ),
            Self::Authorization(_) => "Access Denied: check that the generative API is enabled for your key and that the key is valid.".to_string(),
            Self::InvalidRequest(_) => {
                "Session Error: the remote session or resource is invalid. Re-authenticate and try again.".to_string()
            }
            Self::Format { excerpt } => {
                format!("The model returned something that isn't a song list. Please try again.\nReceived: {excerpt}")
            }
            Self::Transport(msg) => format!("Error: {msg}"),
            Self::InvalidQuery(msg) => format!("Invalid letter: {msg}"),
            Self::Config(msg) => format!("Configuration Error: {msg}"),
        }
    }
}

/// Truncate `raw` to at most `limit` characters, marking the cut with an ellipsis.
pub fn excerpt(raw: &str, limit: usize) -> String {
    match raw.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}…", &raw[..cut]),
        None => raw.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, AntakshariError>;
