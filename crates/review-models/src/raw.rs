use serde::{Deserialize, Serialize};

/// One review as delivered by the Hostaway API (or the mock fixture).
///
/// Every field is optional: the platform enforces nothing on this shape, and
/// a partially filled record must still make it through normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawReview {
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub review_type: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "guestName")]
    pub guest_name: Option<String>,
    #[serde(rename = "listingName")]
    pub listing_name: Option<String>,
    #[serde(rename = "listingId")]
    pub listing_id: Option<i64>,
    pub rating: Option<f64>,
    #[serde(rename = "reviewCategory")]
    pub review_category: Vec<RawReviewCategory>,
    #[serde(rename = "publicReview")]
    pub public_review: Option<String>,
    #[serde(rename = "submittedAt")]
    pub submitted_at: Option<String>,
}

/// A named sub-score contributing to a review's average rating. Both fields
/// are optional on the wire; an entry missing either one still counts toward
/// the category total but never lands in the category map.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawReviewCategory {
    pub category: Option<String>,
    pub rating: Option<f64>,
}
