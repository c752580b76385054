use crate::error::SourceError;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// GET /reviews for an account. All failure modes (connect, timeout, 4xx,
/// 5xx) normalize into `SourceError::Fetch` with the upstream status and
/// message when available.
pub async fn get_reviews(
    client: &Client,
    base_url: &str,
    api_key: &str,
    account_id: &str,
) -> Result<Value, SourceError> {
    let url = format!("{}/reviews", base_url.trim_end_matches('/'));
    debug!(%url, account_id, "fetching reviews from Hostaway API");

    let response = client
        .get(&url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .query(&[("accountId", account_id)])
        .send()
        .await
        .map_err(|e| {
            let message = if e.is_timeout() {
                "Hostaway API: request timed out".to_string()
            } else if e.is_connect() {
                "Hostaway API: no response received, check your connection".to_string()
            } else {
                format!("Hostaway API request error: {}", e)
            };
            SourceError::Fetch {
                status: None,
                message,
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        // Pull the API's own message out of the error body when it has one
        let body: Value = response.json().await.unwrap_or(Value::Null);
        let upstream = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error");
        return Err(SourceError::Fetch {
            status: Some(status.as_u16()),
            message: format!("Hostaway API error: {} - {}", status.as_u16(), upstream),
        });
    }

    response.json::<Value>().await.map_err(|e| SourceError::Fetch {
        status: None,
        message: format!("Hostaway API returned an unreadable body: {}", e),
    })
}
