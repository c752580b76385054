use crate::error::SourceError;
use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

/// The envelope a source returns when it has nothing: `{"status":
/// "success", "result": []}`.
pub fn empty_envelope() -> Value {
    serde_json::json!({ "status": "success", "result": [] })
}

/// A provider of raw review envelopes (`{"status": ..., "result": [...]}`).
///
/// Implementations are interchangeable: the mock fixture and the Hostaway
/// API client both satisfy this trait and the caller never distinguishes
/// them.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Fetch the raw review envelope. May suspend on file or network I/O.
    /// Failures are never retried here.
    async fn fetch_reviews(&self) -> Result<Value, SourceError>;

    /// Synchronous variant for callers that cannot suspend. Only the
    /// fixture source supports it; every other source logs a warning and
    /// returns an empty envelope. Errors are swallowed, not raised —
    /// callers must be aware of this asymmetry.
    fn fetch_reviews_blocking(&self) -> Value {
        warn!(
            source = self.source_name(),
            "blocking fetch is only supported for the mock fixture; returning empty envelope"
        );
        empty_envelope()
    }
}
