use thiserror::Error;

/// Errors surfaced by [`ElkClient`](crate::ElkClient) and
/// [`ElkStore`](crate::ElkStore) operations.
///
/// Every failure is returned to the caller immediately; nothing is retried
/// locally.
#[derive(Debug, Error)]
pub enum ElkError {
    /// Network or connection failure from the HTTP transport.
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response carrying a parsed Elasticsearch error envelope.
    #[error("[{status}] {kind}: {reason}")]
    Server {
        status: u16,
        kind: String,
        reason: String,
    },

    /// Non-2xx response whose body did not carry the error envelope.
    #[error("[{0}] unexpected status")]
    UnexpectedStatus(u16),

    /// A get-by-ID missed.
    #[error("document {id} not found in index {index}")]
    NotFound { index: String, id: String },

    /// The caller's document could not be serialized to JSON.
    #[error("serialize document: {0}")]
    Serialize(serde_json::Error),

    /// The response body could not be decoded into the expected shape.
    #[error("decode response: {0}")]
    Deserialize(serde_json::Error),
}
