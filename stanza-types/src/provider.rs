//! The generic model-provider capability.
//!
//! A [`ModelProvider`] binds a backend's query function and chunk decoder
//! together with a default model name and default options. Backend crates
//! (Ollama, etc.) construct one with their own defaults; callers may
//! override any piece. The provider itself holds no request state — every
//! dispatch builds its own stream and cancellation token.

use std::sync::Arc;

use futures::StreamExt;
use futures::future::BoxFuture;
use futures::stream::BoxStream;

use crate::error::{DecodeError, DispatchError, ProviderError};
use crate::stream::ChunkStream;
use crate::types::{ModelInput, QueryType, StreamedChunk};

/// Issues a request and returns its chunk stream.
pub type QueryFn = Arc<
    dyn Fn(QueryType, ModelInput) -> BoxFuture<'static, Result<ChunkStream, DispatchError>>
        + Send
        + Sync,
>;

/// Extracts text from one streamed chunk. Must be pure and stateless.
pub type DecoderFn =
    Arc<dyn Fn(&StreamedChunk, QueryType) -> Result<String, DecodeError> + Send + Sync>;

/// A model backend bound to its query function and chunk decoder.
///
/// # Example
///
/// ```ignore
/// let provider = ollama.into_provider().with_model("mistral");
/// let mut text = provider
///     .stream_text(QueryType::Chat, ModelInput::default())
///     .await?;
/// while let Some(fragment) = text.next().await {
///     print!("{}", fragment?);
/// }
/// ```
pub struct ModelProvider {
    query: QueryFn,
    decoder: DecoderFn,
    model: String,
    defaults: serde_json::Map<String, serde_json::Value>,
}

impl ModelProvider {
    /// Create a provider from a backend's query function, decoder, and
    /// default model.
    pub fn new(query: QueryFn, decoder: DecoderFn, model: impl Into<String>) -> Self {
        Self {
            query,
            decoder,
            model: model.into(),
            defaults: serde_json::Map::new(),
        }
    }

    /// Override the query function.
    #[must_use]
    pub fn with_query(mut self, query: QueryFn) -> Self {
        self.query = query;
        self
    }

    /// Override the chunk decoder.
    #[must_use]
    pub fn with_decoder(mut self, decoder: DecoderFn) -> Self {
        self.decoder = decoder;
        self
    }

    /// Override the default model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Add a default option, applied when the caller's input does not set
    /// the same key.
    #[must_use]
    pub fn with_default(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    /// Default model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Decode one chunk with this provider's decoder.
    pub fn decode(
        &self,
        chunk: &StreamedChunk,
        query_type: QueryType,
    ) -> Result<String, DecodeError> {
        (self.decoder)(chunk, query_type)
    }

    /// Dispatch a query and return its raw chunk stream.
    ///
    /// The default model is substituted when `input.model` is empty, and
    /// provider defaults are merged under the caller's options (caller
    /// wins on conflicts).
    pub async fn query(
        &self,
        query_type: QueryType,
        input: ModelInput,
    ) -> Result<ChunkStream, DispatchError> {
        (self.query)(query_type, self.apply_defaults(input)).await
    }

    /// Dispatch a query and lazily decode each chunk into text.
    ///
    /// Explicit result split: a dispatch failure is the `Err` of the outer
    /// `Result`; a decode or mid-stream transport failure surfaces at the
    /// offending element of the stream.
    pub async fn stream_text(
        &self,
        query_type: QueryType,
        input: ModelInput,
    ) -> Result<BoxStream<'static, Result<String, ProviderError>>, DispatchError> {
        let chunks = self.query(query_type, input).await?;
        let decoder = Arc::clone(&self.decoder);
        let text = chunks.receiver.map(move |item| match item {
            Ok(bytes) => {
                decoder(&StreamedChunk::Bytes(bytes), query_type).map_err(ProviderError::from)
            }
            Err(e) => Err(ProviderError::from(e)),
        });
        Ok(text.boxed())
    }

    fn apply_defaults(&self, mut input: ModelInput) -> ModelInput {
        if input.model.is_empty() {
            input.model = self.model.clone();
        }
        for (key, value) in &self.defaults {
            input
                .extra
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        input
    }
}
