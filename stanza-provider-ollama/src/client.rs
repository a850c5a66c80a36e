//! Ollama API client struct and request dispatch.

use std::sync::Arc;

use stanza_types::{ChunkStream, DispatchError, ModelInput, ModelProvider, QueryFn, QueryType};
use tokio_util::sync::CancellationToken;

use crate::DEFAULT_MODEL;
use crate::decode::decode_chunk;
use crate::streaming::chunk_stream;

/// Default Ollama API base URL.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434/api";

/// Environment variable overriding the API base URL.
///
/// Read once by [`Ollama::from_env`]; never consulted again at dispatch
/// time.
pub const BASE_URL_ENV: &str = "STANZA_OLLAMA_API_BASE";

/// Client for the Ollama streaming API.
///
/// Routes [`QueryType::Chat`] to `{base}/chat` and
/// [`QueryType::Completion`] to `{base}/generate`, and hands the response
/// body back as a pull-based [`ChunkStream`].
///
/// # Example
///
/// ```no_run
/// use stanza_provider_ollama::Ollama;
///
/// let client = Ollama::new().base_url("http://127.0.0.1:11434/api");
/// ```
#[derive(Clone)]
pub struct Ollama {
    /// API base URL (override for testing or remote Ollama instances).
    pub(crate) base_url: String,
    /// Shared HTTP client.
    pub(crate) client: reqwest::Client,
}

impl Ollama {
    /// Create a new client with the default base URL.
    ///
    /// No authentication required (Ollama is local).
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a client from process configuration.
    ///
    /// Reads [`BASE_URL_ENV`] once at construction, falling back to the
    /// default base URL when unset. Inject the result where it is needed;
    /// nothing re-reads the environment per call.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(base) => Self::new().base_url(base),
            Err(_) => Self::new(),
        }
    }

    /// Override the API base URL.
    ///
    /// Useful for testing with a local mock server or a remote Ollama
    /// instance.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Build the endpoint URL for a query type.
    pub(crate) fn endpoint_url(&self, query_type: QueryType) -> String {
        let path = match query_type {
            QueryType::Chat => "/chat",
            QueryType::Completion => "/generate",
        };
        format!("{}{}", self.base_url, path)
    }

    /// Issue a request and return its body as a pull-based chunk stream.
    ///
    /// The payload is serialized as the POST body and passed through
    /// uninterpreted apart from the model field in the log record. Exactly
    /// one attempt, no timeout.
    ///
    /// On any failure the per-call cancellation token is triggered and an
    /// error record is logged before the `Err` returns. Upstream failures
    /// (non-ok status, or an ok response with no body) carry the raw
    /// response text.
    pub async fn dispatch(
        &self,
        query_type: QueryType,
        input: &ModelInput,
    ) -> Result<ChunkStream, DispatchError> {
        tracing::debug!(model = %input.model, input = ?input, "calling model");

        let token = CancellationToken::new();
        let url = self.endpoint_url(query_type);

        let response = match self.client.post(&url).json(input).send().await {
            Ok(response) => response,
            Err(e) => {
                token.cancel();
                tracing::error!(error = %e, url = %url, "model request failed");
                return Err(DispatchError::Network(Box::new(e)));
            }
        };

        if !response.status().is_success() || response.content_length() == Some(0) {
            token.cancel();
            let text = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!(error = %e, url = %url, "model request failed");
                    return Err(DispatchError::Network(Box::new(e)));
                }
            };
            tracing::error!(error = %text, url = %url, "model request failed");
            return Err(DispatchError::Upstream(text));
        }

        Ok(chunk_stream(response, token))
    }

    /// Bind this client into the generic [`ModelProvider`] capability.
    ///
    /// Supplies the Ollama defaults: this client's [`dispatch`] as the
    /// query function, [`decode_chunk`] as the chunk decoder, and
    /// [`DEFAULT_MODEL`] as the model. All remain overridable on the
    /// returned provider.
    ///
    /// [`dispatch`]: Ollama::dispatch
    #[must_use]
    pub fn into_provider(self) -> ModelProvider {
        let query: QueryFn = Arc::new(move |query_type, input| {
            let client = self.clone();
            Box::pin(async move { client.dispatch(query_type, &input).await })
        });
        ModelProvider::new(
            query,
            Arc::new(|chunk, query_type| decode_chunk(chunk, query_type)),
            DEFAULT_MODEL,
        )
    }
}

impl Default for Ollama {
    fn default() -> Self {
        Self::new()
    }
}
