use serde::{Deserialize, Serialize};

/// Human-readable rating bucket. The thresholds are a fixed policy table,
/// not configurable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RatingLabel {
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Fair,
    Poor,
    #[serde(rename = "No Rating")]
    NoRating,
}

impl RatingLabel {
    /// Bucket an average rating. Lower bounds are inclusive: 9.5 is
    /// Excellent, 8.5 is Very Good, 8.49 is Good.
    pub fn from_average(average: Option<f64>) -> Self {
        match average {
            None => RatingLabel::NoRating,
            Some(r) if r >= 9.5 => RatingLabel::Excellent,
            Some(r) if r >= 8.5 => RatingLabel::VeryGood,
            Some(r) if r >= 7.5 => RatingLabel::Good,
            Some(r) if r >= 6.5 => RatingLabel::Fair,
            Some(_) => RatingLabel::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RatingLabel::Excellent => "Excellent",
            RatingLabel::VeryGood => "Very Good",
            RatingLabel::Good => "Good",
            RatingLabel::Fair => "Fair",
            RatingLabel::Poor => "Poor",
            RatingLabel::NoRating => "No Rating",
        }
    }
}

impl std::fmt::Display for RatingLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
