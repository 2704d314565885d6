use thiserror::Error;

#[derive(Error, Debug)]
pub enum TartilError {
    #[error("Upstream fetch failed: {operation} {target} returned HTTP {status}")]
    UpstreamFetch {
        operation: &'static str,
        target: String,
        status: u16,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        source: serde_json::Error,
    },

    #[error("Malformed upstream record: {0}")]
    MalformedRecord(String),

    #[error("Invalid {scheme} id: {id}")]
    InvalidAddress { scheme: &'static str, id: u32 },

    #[error("Invalid verse key: {0}")]
    InvalidVerseKey(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl TartilError {
    /// HTTP status for upstream failures, so callers can decide on a retry policy.
    pub fn status(&self) -> Option<u16> {
        match self {
            TartilError::UpstreamFetch { status, .. } => Some(*status),
            TartilError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TartilError>;
