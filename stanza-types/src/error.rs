//! Error types for dispatch and chunk decoding.

/// Errors from issuing a request and streaming its response.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Transport-level failure (connect, DNS, mid-stream read).
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Non-ok HTTP status, or an ok response with no body. The payload is
    /// the raw response text, not a structured error.
    #[error("upstream error: {0}")]
    Upstream(String),
}

/// Errors from decoding a single streamed chunk.
///
/// Decoders never catch these; they surface at the point the offending
/// chunk is consumed.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Chunk bytes are not valid UTF-8.
    #[error("invalid utf-8 in chunk: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Chunk text is not a single well-formed JSON object.
    #[error("invalid json in chunk: {0}")]
    Json(#[from] serde_json::Error),
    /// The parsed object lacks the field expected for the query type.
    #[error("missing field in chunk: {0}")]
    MissingField(&'static str),
}

/// Errors surfaced by a composed text stream.
///
/// Lets callers tell a transport failure apart from a bad chunk, per the
/// two-kind taxonomy of the dispatch and decode layers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The request could not be dispatched or the stream broke mid-read.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    /// A chunk could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
