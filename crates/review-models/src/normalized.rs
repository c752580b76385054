use crate::label::RatingLabel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical review shape served to the dashboard and the property page.
///
/// Immutable after creation; every derived field is computed once during
/// normalization so consumers never re-derive anything.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedReview {
    pub id: i64,
    #[serde(rename = "type")]
    pub review_type: String,
    pub status: String,
    pub guest_name: String,
    pub listing_name: String,
    /// Resolved via the listing directory when the source omits it; null
    /// when the listing name is unknown.
    pub listing_id: Option<i64>,
    /// Mean of category ratings rounded to 2 decimals, or the raw scalar
    /// rating when no categories exist. Absent (not zero) when neither is
    /// present.
    pub average_rating: Option<f64>,
    pub categories: BTreeMap<String, f64>,
    pub comment: String,
    /// Source-provided submission timestamp, passed through verbatim.
    pub submitted_at: String,

    // Derived presentation fields
    pub is_host_review: bool,
    pub is_guest_review: bool,
    pub has_high_rating: bool,
    pub rating_label: RatingLabel,
    /// en-GB short date ("2 Jan 2024"); falls back to the raw submitted_at
    /// string when the date does not parse.
    pub formatted_date: String,

    // For sorting and filtering
    /// Epoch milliseconds of submitted_at, 0 when unparseable.
    pub timestamp: i64,
    pub year: Option<i32>,
    pub month: Option<u32>,
}
