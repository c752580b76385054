pub mod error;
pub mod factory;
pub mod fixture;
pub mod hostaway;
pub mod traits;

pub use error::SourceError;
pub use factory::create_source;
pub use fixture::FixtureSource;
pub use hostaway::HostawayClient;
pub use traits::{empty_envelope, ReviewSource};
