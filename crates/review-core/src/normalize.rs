use crate::listing_directory::{ListingDirectory, StaticListingDirectory};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use review_models::{NormalizedReview, RatingLabel, RawReview};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Hostaway delivers either RFC 3339 or "YYYY-MM-DD HH:MM:SS"; bare dates
/// show up in hand-edited fixtures.
fn parse_submitted(submitted_at: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(submitted_at) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(submitted_at, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(submitted_at, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

/// en-GB short form, e.g. "21 Aug 2020".
fn format_date_en_gb(dt: &DateTime<Utc>) -> String {
    format!("{} {} {}", dt.day(), dt.format("%b"), dt.year())
}

/// The source-independent fields of one review; everything else on
/// `NormalizedReview` is derived from these.
struct BaseFields {
    id: i64,
    review_type: String,
    status: String,
    guest_name: String,
    listing_name: String,
    listing_id: Option<i64>,
    average_rating: Option<f64>,
    categories: BTreeMap<String, f64>,
    comment: String,
    submitted_at: String,
}

fn build_review(base: BaseFields) -> NormalizedReview {
    let parsed = parse_submitted(&base.submitted_at);

    NormalizedReview {
        is_host_review: base.review_type == "host-to-guest",
        is_guest_review: base.review_type == "guest-to-host",
        has_high_rating: base.average_rating.map(|r| r >= 9.0).unwrap_or(false),
        rating_label: RatingLabel::from_average(base.average_rating),
        formatted_date: parsed
            .map(|d| format_date_en_gb(&d))
            .unwrap_or_else(|| base.submitted_at.clone()),
        timestamp: parsed.map(|d| d.timestamp_millis()).unwrap_or(0),
        year: parsed.map(|d| d.year()),
        month: parsed.map(|d| d.month()),
        id: base.id,
        review_type: base.review_type,
        status: base.status,
        guest_name: base.guest_name,
        listing_name: base.listing_name,
        listing_id: base.listing_id,
        average_rating: base.average_rating,
        categories: base.categories,
        comment: base.comment,
        submitted_at: base.submitted_at,
    }
}

/// Fallback for a record that would not deserialize: carry only what can be
/// safely extracted instead of dropping the item or aborting the batch.
fn degraded_record(item: &Value) -> NormalizedReview {
    let text = |key: &str, fallback: &str| {
        item.get(key)
            .and_then(Value::as_str)
            .unwrap_or(fallback)
            .to_string()
    };

    build_review(BaseFields {
        id: item.get("id").and_then(Value::as_i64).unwrap_or(0),
        review_type: text("type", "unknown"),
        status: text("status", "unknown"),
        guest_name: text("guestName", "Unknown"),
        listing_name: text("listingName", "Unknown"),
        listing_id: None,
        average_rating: None,
        categories: BTreeMap::new(),
        comment: text("publicReview", ""),
        submitted_at: item
            .get("submittedAt")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| Utc::now().to_rfc3339()),
    })
}

/// Maps raw source records into the canonical review shape. Never fails:
/// non-array input yields an empty batch, malformed records degrade per
/// item.
pub struct Normalizer {
    directory: Box<dyn ListingDirectory>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Box::new(StaticListingDirectory))
    }
}

impl Normalizer {
    pub fn new(directory: Box<dyn ListingDirectory>) -> Self {
        Self { directory }
    }

    /// Unwrap a source envelope (`{"result": [...]}`) and normalize its
    /// records. A bare top-level array is accepted too.
    pub fn normalize_envelope(&self, doc: &Value) -> Vec<NormalizedReview> {
        let items = match doc.get("result") {
            Some(result) if !result.is_null() => result,
            _ => doc,
        };
        self.normalize(items)
    }

    pub fn normalize(&self, reviews: &Value) -> Vec<NormalizedReview> {
        let Some(items) = reviews.as_array() else {
            warn!("invalid reviews payload: expected an array");
            return Vec::new();
        };
        items.iter().map(|item| self.normalize_item(item)).collect()
    }

    fn normalize_item(&self, item: &Value) -> NormalizedReview {
        match serde_json::from_value::<RawReview>(item.clone()) {
            Ok(raw) => self.normalize_record(raw),
            Err(e) => {
                warn!("emitting degraded record for malformed review: {}", e);
                degraded_record(item)
            }
        }
    }

    fn normalize_record(&self, raw: RawReview) -> NormalizedReview {
        // Category mean wins over the scalar rating; neither present means
        // no rating at all, never zero.
        let average_rating = if !raw.review_category.is_empty() {
            let sum: f64 = raw
                .review_category
                .iter()
                .map(|c| c.rating.unwrap_or(0.0))
                .sum();
            Some(round2(sum / raw.review_category.len() as f64))
        } else {
            raw.rating
        };

        let mut categories = BTreeMap::new();
        for cat in &raw.review_category {
            if let (Some(name), Some(rating)) = (&cat.category, cat.rating) {
                categories.insert(name.clone(), rating);
            }
        }

        let listing_name = raw.listing_name.unwrap_or_default();
        let listing_id = raw
            .listing_id
            .or_else(|| self.directory.listing_id(&listing_name));

        build_review(BaseFields {
            id: raw.id.unwrap_or(0),
            review_type: raw.review_type.unwrap_or_default(),
            status: raw.status.unwrap_or_default(),
            guest_name: raw.guest_name.unwrap_or_default(),
            listing_name,
            listing_id,
            average_rating,
            categories,
            comment: raw.public_review.unwrap_or_default(),
            submitted_at: raw.submitted_at.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_average_is_mean_of_categories() {
        let normalizer = Normalizer::default();
        let reviews = normalizer.normalize(&json!([{
            "id": 7,
            "type": "guest-to-host",
            "status": "published",
            "guestName": "Shane Finkelstein",
            "listingName": "2B N1 A - 29 Shoreditch Heights",
            "reviewCategory": [
                { "category": "cleanliness", "rating": 8 },
                { "category": "communication", "rating": 10 }
            ],
            "publicReview": "Great host!",
            "submittedAt": "2020-08-21 22:45:14"
        }]));

        assert_eq!(reviews.len(), 1);
        let r = &reviews[0];
        assert_eq!(r.average_rating, Some(9.0));
        assert_eq!(r.rating_label, RatingLabel::VeryGood);
        assert!(r.has_high_rating);
        assert_eq!(r.categories.get("cleanliness"), Some(&8.0));
        assert_eq!(r.categories.get("communication"), Some(&10.0));
        assert!(r.is_guest_review);
        assert!(!r.is_host_review);
    }

    #[test]
    fn test_average_rounds_to_two_decimals() {
        let normalizer = Normalizer::default();
        let reviews = normalizer.normalize(&json!([{
            "id": 1,
            "reviewCategory": [
                { "category": "cleanliness", "rating": 9 },
                { "category": "communication", "rating": 9 },
                { "category": "location", "rating": 8 }
            ]
        }]));
        assert_eq!(reviews[0].average_rating, Some(8.67));
    }

    #[test]
    fn test_scalar_rating_used_when_no_categories() {
        let normalizer = Normalizer::default();
        let reviews = normalizer.normalize(&json!([{ "id": 2, "rating": 8.4 }]));
        assert_eq!(reviews[0].average_rating, Some(8.4));
        assert_eq!(reviews[0].rating_label, RatingLabel::Good);
    }

    #[test]
    fn test_no_rating_data_means_absent_not_zero() {
        let normalizer = Normalizer::default();
        let reviews = normalizer.normalize(&json!([{ "id": 3 }]));
        assert_eq!(reviews[0].average_rating, None);
        assert_eq!(reviews[0].rating_label, RatingLabel::NoRating);
        assert!(!reviews[0].has_high_rating);
    }

    #[test]
    fn test_listing_id_resolution() {
        let normalizer = Normalizer::default();
        let reviews = normalizer.normalize(&json!([
            // explicit listingId wins over the directory
            { "id": 1, "listingId": 999, "listingName": "Beachfront Studio" },
            // resolved from the directory by name
            { "id": 2, "listingName": "City Center Penthouse" },
            // unknown name resolves to null, not an error
            { "id": 3, "listingName": "No Such Place" }
        ]));
        assert_eq!(reviews[0].listing_id, Some(999));
        assert_eq!(reviews[1].listing_id, Some(103));
        assert_eq!(reviews[2].listing_id, None);
    }

    #[test]
    fn test_injected_directory_is_used() {
        struct OneListing;
        impl ListingDirectory for OneListing {
            fn listing_id(&self, listing_name: &str) -> Option<i64> {
                (listing_name == "Test Flat").then_some(7)
            }
        }

        let normalizer = Normalizer::new(Box::new(OneListing));
        let reviews = normalizer.normalize(&json!([{ "id": 1, "listingName": "Test Flat" }]));
        assert_eq!(reviews[0].listing_id, Some(7));
    }

    #[test]
    fn test_date_derivation() {
        let normalizer = Normalizer::default();
        let reviews = normalizer.normalize(&json!([{
            "id": 1,
            "submittedAt": "2020-08-21 22:45:14"
        }]));
        let r = &reviews[0];
        assert_eq!(r.formatted_date, "21 Aug 2020");
        assert_eq!(r.year, Some(2020));
        assert_eq!(r.month, Some(8));
        assert!(r.timestamp > 0);
        assert_eq!(r.submitted_at, "2020-08-21 22:45:14");
    }

    #[test]
    fn test_unparseable_date_falls_back_to_raw_string() {
        let normalizer = Normalizer::default();
        let reviews = normalizer.normalize(&json!([{
            "id": 1,
            "submittedAt": "not a date"
        }]));
        let r = &reviews[0];
        assert_eq!(r.formatted_date, "not a date");
        assert_eq!(r.timestamp, 0);
        assert_eq!(r.year, None);
        assert_eq!(r.month, None);
    }

    #[test]
    fn test_malformed_record_degrades_instead_of_dropping() {
        let normalizer = Normalizer::default();
        // rating is a string: the record fails deserialization but the rest
        // of the batch survives
        let reviews = normalizer.normalize(&json!([
            { "id": 4, "rating": "broken", "guestName": "Ana", "publicReview": "ok" },
            { "id": 5, "rating": 7 }
        ]));
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].id, 4);
        assert_eq!(reviews[0].guest_name, "Ana");
        assert_eq!(reviews[0].listing_name, "Unknown");
        assert_eq!(reviews[0].review_type, "unknown");
        assert_eq!(reviews[0].average_rating, None);
        assert_eq!(reviews[0].comment, "ok");
        assert_eq!(reviews[1].average_rating, Some(7.0));
    }

    #[test]
    fn test_non_array_input_yields_empty_batch() {
        let normalizer = Normalizer::default();
        assert!(normalizer.normalize(&json!({"oops": true})).is_empty());
        assert!(normalizer.normalize(&json!("nope")).is_empty());
        assert!(normalizer.normalize(&json!(null)).is_empty());
    }

    #[test]
    fn test_envelope_unwrapping() {
        let normalizer = Normalizer::default();
        let from_envelope =
            normalizer.normalize_envelope(&json!({"status": "success", "result": [{"id": 1}]}));
        assert_eq!(from_envelope.len(), 1);

        let from_bare = normalizer.normalize_envelope(&json!([{"id": 2}]));
        assert_eq!(from_bare.len(), 1);

        let from_null_result = normalizer.normalize_envelope(&json!({"result": null}));
        assert!(from_null_result.is_empty());
    }

    #[test]
    fn test_category_entry_missing_rating_counts_toward_mean_only() {
        let normalizer = Normalizer::default();
        let reviews = normalizer.normalize(&json!([{
            "id": 1,
            "reviewCategory": [
                { "category": "cleanliness", "rating": 10 },
                { "category": "communication" }
            ]
        }]));
        // missing rating counts as 0 in the mean but is not in the map
        assert_eq!(reviews[0].average_rating, Some(5.0));
        assert_eq!(reviews[0].categories.len(), 1);
    }
}
