use crate::normalized::NormalizedReview;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A review an operator has approved for public display, as persisted in the
/// approval ledger. The ledger is the sole source of truth for visibility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApprovedReview {
    #[serde(flatten)]
    pub review: NormalizedReview,
    pub approved_at: DateTime<Utc>,
    pub is_approved: bool,
}

impl ApprovedReview {
    pub fn new(review: NormalizedReview, approved_at: DateTime<Utc>) -> Self {
        Self {
            review,
            approved_at,
            is_approved: true,
        }
    }

    pub fn id(&self) -> i64 {
        self.review.id
    }
}
