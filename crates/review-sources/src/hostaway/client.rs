use crate::error::SourceError;
use crate::hostaway::api;
use crate::traits::ReviewSource;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

/// Upstream calls are bounded; there is no retry on top of this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct HostawayClient {
    client: Client,
    api_base: String,
    account_id: String,
    api_key: String,
}

impl HostawayClient {
    pub fn new(api_base: String, account_id: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_base,
            account_id,
            api_key,
        }
    }
}

#[async_trait]
impl ReviewSource for HostawayClient {
    fn source_name(&self) -> &str {
        "hostaway"
    }

    async fn fetch_reviews(&self) -> Result<Value, SourceError> {
        let doc = api::get_reviews(
            &self.client,
            &self.api_base,
            &self.api_key,
            &self.account_id,
        )
        .await?;

        let count = doc
            .get("result")
            .and_then(Value::as_array)
            .map(|r| r.len())
            .unwrap_or(0);
        info!(count, "fetched reviews from Hostaway API");

        Ok(doc)
    }

    // fetch_reviews_blocking deliberately not overridden: the remote
    // strategy has no synchronous path.
}
