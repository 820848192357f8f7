/// Errors classified by the store layer.
///
/// `Corrupt` never propagates to engine callers: reads fall back to the
/// default unacknowledged state and log the condition. It exists as a type so
/// the classification itself is testable.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("corrupt value under key {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
