use crate::error::SourceError;
use crate::traits::{empty_envelope, ReviewSource};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Static JSON stand-in for the live Hostaway API.
///
/// The candidate list is injected at construction and probed in order; the
/// first existing path wins. There is no global fixture path.
pub struct FixtureSource {
    candidates: Vec<PathBuf>,
}

impl FixtureSource {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// Standard candidate layout under a base directory, in lookup order.
    pub fn with_base(base: &Path) -> Self {
        Self::new(vec![
            base.join("mock").join("reviews.json"),
            base.join("data").join("mockReviews.json"),
            base.join("data").join("reviews.json"),
        ])
    }

    fn load(&self) -> Result<Value, SourceError> {
        let path = self
            .candidates
            .iter()
            .find(|p| p.exists())
            .ok_or(SourceError::FixtureNotFound {
                checked: self.candidates.len(),
            })?;

        let raw = std::fs::read_to_string(path).map_err(|source| SourceError::FixtureRead {
            path: path.clone(),
            source,
        })?;
        let doc: Value =
            serde_json::from_str(&raw).map_err(|source| SourceError::FixtureParse {
                path: path.clone(),
                source,
            })?;

        let count = doc
            .get("result")
            .and_then(Value::as_array)
            .map(|r| r.len())
            .or_else(|| doc.as_array().map(|r| r.len()))
            .unwrap_or(0);
        debug!(path = %path.display(), count, "loaded reviews from mock fixture");

        Ok(doc)
    }
}

#[async_trait]
impl ReviewSource for FixtureSource {
    fn source_name(&self) -> &str {
        "mock"
    }

    async fn fetch_reviews(&self) -> Result<Value, SourceError> {
        self.load()
    }

    fn fetch_reviews_blocking(&self) -> Value {
        match self.load() {
            Ok(doc) => doc,
            Err(e) => {
                warn!("blocking fixture fetch failed: {}", e);
                empty_envelope()
            }
        }
    }
}
