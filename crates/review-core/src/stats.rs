use crate::normalize::round2;
use review_models::NormalizedReview;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate view over a review collection, as served to the dashboard
/// stats cards.
#[derive(Debug, Serialize, PartialEq)]
pub struct ReviewStats {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_status: BTreeMap<String, usize>,
    pub by_listing: BTreeMap<String, usize>,
    /// Mean of all present average ratings, 2 decimal places. 0.0 when no
    /// review carries a rating — the only way "no ratings" and "zero
    /// rating" are distinguished is this convention.
    pub average_rating: f64,
    pub rating_distribution: RatingDistribution,
}

/// Bucket counts over reviews that carry a rating. The bucket cut points
/// are coarser than the rating labels on purpose: the dashboard renders
/// four bars, not six.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct RatingDistribution {
    /// average >= 9
    pub excellent: usize,
    /// 7 <= average < 9
    pub good: usize,
    /// 5 <= average < 7
    pub average: usize,
    /// average < 5
    pub poor: usize,
}

pub fn compute_stats(reviews: &[NormalizedReview]) -> ReviewStats {
    let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_listing: BTreeMap<String, usize> = BTreeMap::new();
    let mut distribution = RatingDistribution::default();
    let mut total_rating = 0.0;
    let mut rating_count = 0usize;

    for review in reviews {
        *by_type.entry(review.review_type.clone()).or_default() += 1;
        *by_status.entry(review.status.clone()).or_default() += 1;
        *by_listing.entry(review.listing_name.clone()).or_default() += 1;

        if let Some(rating) = review.average_rating {
            total_rating += rating;
            rating_count += 1;

            if rating >= 9.0 {
                distribution.excellent += 1;
            } else if rating >= 7.0 {
                distribution.good += 1;
            } else if rating >= 5.0 {
                distribution.average += 1;
            } else {
                distribution.poor += 1;
            }
        }
    }

    let average_rating = if rating_count > 0 {
        round2(total_rating / rating_count as f64)
    } else {
        0.0
    };

    ReviewStats {
        total: reviews.len(),
        by_type,
        by_status,
        by_listing,
        average_rating,
        rating_distribution: distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Normalizer;
    use serde_json::json;

    fn sample() -> Vec<NormalizedReview> {
        Normalizer::default().normalize(&json!([
            { "id": 1, "type": "guest-to-host", "status": "published",
              "listingName": "Beachfront Studio", "rating": 9.5 },
            { "id": 2, "type": "guest-to-host", "status": "published",
              "listingName": "Beachfront Studio", "rating": 7.0 },
            { "id": 3, "type": "host-to-guest", "status": "pending",
              "listingName": "City Center Penthouse", "rating": 4.0 },
            { "id": 4, "type": "guest-to-host", "status": "published",
              "listingName": "Garden View Apartment" }
        ]))
    }

    #[test]
    fn test_total_and_bucket_sums() {
        let stats = compute_stats(&sample());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_status.values().sum::<usize>(), stats.total);
        assert_eq!(stats.by_type.values().sum::<usize>(), stats.total);
        assert_eq!(stats.by_type["guest-to-host"], 3);
        assert_eq!(stats.by_status["pending"], 1);
        assert_eq!(stats.by_listing["Beachfront Studio"], 2);
    }

    #[test]
    fn test_average_skips_unrated_reviews() {
        let stats = compute_stats(&sample());
        // (9.5 + 7.0 + 4.0) / 3 = 6.83..., the unrated review is excluded
        assert_eq!(stats.average_rating, 6.83);
    }

    #[test]
    fn test_distribution_counts_only_rated_reviews() {
        let stats = compute_stats(&sample());
        assert_eq!(stats.rating_distribution.excellent, 1);
        assert_eq!(stats.rating_distribution.good, 1);
        assert_eq!(stats.rating_distribution.average, 0);
        assert_eq!(stats.rating_distribution.poor, 1);
        let counted = stats.rating_distribution.excellent
            + stats.rating_distribution.good
            + stats.rating_distribution.average
            + stats.rating_distribution.poor;
        assert_eq!(counted, 3);
    }

    #[test]
    fn test_empty_collection_reports_zero_average() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert!(stats.by_listing.is_empty());
    }
}
