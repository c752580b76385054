use crate::fixture::FixtureSource;
use crate::hostaway::HostawayClient;
use crate::traits::ReviewSource;
use anyhow::Result;
use review_config::{Config, PathManager};
use tracing::info;

/// Build the review source selected by configuration: the mock fixture by
/// default, the Hostaway API when `use_mock_data` is off and credentials are
/// present.
pub fn create_source(config: &Config, paths: &PathManager) -> Result<Box<dyn ReviewSource>> {
    if config.hostaway.use_mock_data {
        info!("review source: mock fixture");
        return Ok(Box::new(FixtureSource::new(paths.fixture_candidates())));
    }

    if !config.is_hostaway_configured() {
        return Err(anyhow::anyhow!(
            "Hostaway API mode is enabled but account_id/api_key are not configured"
        ));
    }

    info!(account_id = %config.hostaway.account_id, "review source: Hostaway API");
    Ok(Box::new(HostawayClient::new(
        config.hostaway.api_base.clone(),
        config.hostaway.account_id.clone(),
        config.hostaway.api_key.clone(),
    )))
}
