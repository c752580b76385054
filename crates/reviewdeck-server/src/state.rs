use crate::error::ApiError;
use review_config::Config;
use review_core::{ApprovalLedger, Normalizer};
use review_models::NormalizedReview;
use review_sources::ReviewSource;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub source: Box<dyn ReviewSource>,
    pub normalizer: Normalizer,
    pub ledger: ApprovalLedger,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config, source: Box<dyn ReviewSource>, ledger: ApprovalLedger) -> Self {
        Self {
            config,
            source,
            normalizer: Normalizer::default(),
            ledger,
        }
    }

    /// Fetch the full collection from the configured source and normalize
    /// it. Every request does this independently; there is no cache.
    pub async fn fetch_normalized(&self) -> Result<Vec<NormalizedReview>, ApiError> {
        let doc = self.source.fetch_reviews().await?;
        Ok(self.normalizer.normalize_envelope(&doc))
    }
}
