use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// None of the configured fixture candidate paths exist.
    #[error("mock reviews fixture not found; checked {checked} candidate location(s)")]
    FixtureNotFound { checked: usize },

    #[error("failed to read fixture {path}: {source}")]
    FixtureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fixture {path}: {source}")]
    FixtureParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Remote fetch failed: network trouble, timeout, or an HTTP error
    /// status. Carries the upstream status when one was received.
    #[error("review source fetch failed: {message}")]
    Fetch {
        status: Option<u16>,
        message: String,
    },
}

impl SourceError {
    /// Upstream HTTP status, when the failure came from an API response.
    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::Fetch { status, .. } => *status,
            _ => None,
        }
    }
}
