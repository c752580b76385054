pub mod filter;
pub mod ledger;
pub mod listing_directory;
pub mod normalize;
pub mod stats;

pub use filter::{parse_date_param, sort_reviews, ReviewFilter, SortKey, SortOrder};
pub use ledger::{ApprovalLedger, LedgerError};
pub use listing_directory::{ListingDirectory, StaticListingDirectory};
pub use normalize::Normalizer;
pub use stats::{compute_stats, RatingDistribution, ReviewStats};
