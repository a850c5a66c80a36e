//! Plain data types: query selection, request payloads, streamed chunks.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Which interaction shape a request uses.
///
/// Selects the backend endpoint and the response envelope the decoder
/// expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    /// Multi-turn chat; response records carry a message object.
    Chat,
    /// Single-turn completion; response records carry a raw string.
    Completion,
}

/// Request payload sent to a model backend.
///
/// Serialized as-is into the request body. The dispatcher interprets
/// nothing beyond `model`; backend-specific options go in `extra` and are
/// flattened into the same JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInput {
    /// Model identifier. Providers substitute their default when empty.
    #[serde(default)]
    pub model: String,
    /// Backend-specific fields, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ModelInput {
    /// Create an input for the given model with no extra options.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Add a backend-specific option.
    #[must_use]
    pub fn with_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// One unit of a streamed response, as handed to a chunk decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamedChunk {
    /// Already-decoded text; decoders pass it through unchanged.
    Text(String),
    /// Raw bytes as delivered by the transport.
    Bytes(Bytes),
}

impl From<Bytes> for StreamedChunk {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<String> for StreamedChunk {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for StreamedChunk {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}
