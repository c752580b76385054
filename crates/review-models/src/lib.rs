pub mod approved;
pub mod label;
pub mod normalized;
pub mod raw;

pub use approved::ApprovedReview;
pub use label::RatingLabel;
pub use normalized::NormalizedReview;
pub use raw::{RawReview, RawReviewCategory};
