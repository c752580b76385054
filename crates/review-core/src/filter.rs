use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use review_models::NormalizedReview;
use std::cmp::Ordering;

/// Filter criteria for the review collection. Every field is independently
/// optional; provided criteria combine with logical AND, absent criteria are
/// no-ops.
#[derive(Debug, Default, Clone)]
pub struct ReviewFilter {
    /// Case-insensitive substring of the listing name.
    pub listing: Option<String>,
    /// Inclusive minimum average rating. A review without an average rating
    /// fails any threshold.
    pub min_rating: Option<f64>,
    /// Exact review type ("host-to-guest" / "guest-to-host").
    pub review_type: Option<String>,
    /// Exact status.
    pub status: Option<String>,
    /// Submitted on or after.
    pub start_date: Option<DateTime<Utc>>,
    /// Submitted on or before.
    pub end_date: Option<DateTime<Utc>>,
    /// Case-insensitive substring over guest name OR listing name OR
    /// comment.
    pub search: Option<String>,
}

impl ReviewFilter {
    pub fn matches(&self, review: &NormalizedReview) -> bool {
        if let Some(listing) = &self.listing {
            if !review
                .listing_name
                .to_lowercase()
                .contains(&listing.to_lowercase())
            {
                return false;
            }
        }

        if let Some(min_rating) = self.min_rating {
            // No average rating fails the threshold
            match review.average_rating {
                Some(rating) if rating >= min_rating => {}
                _ => return false,
            }
        }

        if let Some(review_type) = &self.review_type {
            if &review.review_type != review_type {
                return false;
            }
        }

        if let Some(status) = &self.status {
            if &review.status != status {
                return false;
            }
        }

        if let Some(start) = self.start_date {
            if review.year.is_none() || review.timestamp < start.timestamp_millis() {
                return false;
            }
        }

        if let Some(end) = self.end_date {
            if review.year.is_none() || review.timestamp > end.timestamp_millis() {
                return false;
            }
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = review.guest_name.to_lowercase().contains(&needle)
                || review.listing_name.to_lowercase().contains(&needle)
                || review.comment.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, mut reviews: Vec<NormalizedReview>) -> Vec<NormalizedReview> {
        reviews.retain(|r| self.matches(r));
        reviews
    }
}

/// Accepts RFC 3339 or a bare "YYYY-MM-DD" (interpreted as UTC midnight, as
/// the dashboard sends it).
pub fn parse_date_param(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Submission time (epoch millis, unparseable dates sort as 0).
    Date,
    /// Average rating, absent treated as 0.
    Rating,
    /// Guest name, case-insensitive.
    GuestName,
    /// Listing name, case-insensitive.
    ListingName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Stable sort: ties keep their original relative order in both directions.
pub fn sort_reviews(reviews: &mut [NormalizedReview], key: SortKey, order: SortOrder) {
    reviews.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Date => a.timestamp.cmp(&b.timestamp),
            SortKey::Rating => a
                .average_rating
                .unwrap_or(0.0)
                .partial_cmp(&b.average_rating.unwrap_or(0.0))
                .unwrap_or(Ordering::Equal),
            SortKey::GuestName => a
                .guest_name
                .to_lowercase()
                .cmp(&b.guest_name.to_lowercase()),
            SortKey::ListingName => a
                .listing_name
                .to_lowercase()
                .cmp(&b.listing_name.to_lowercase()),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
