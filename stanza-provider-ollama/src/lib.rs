#![deny(missing_docs)]
//! Ollama streaming provider for stanza.
//!
//! Adapts Ollama's streaming HTTP API to the generic
//! [`ModelProvider`] capability: [`Ollama::dispatch`] issues the request
//! and returns a pull-based byte-chunk stream with a cancellation handle,
//! and [`decode_chunk`] extracts the token text from each chunk.
//!
//! # Usage
//!
//! ```no_run
//! use futures::StreamExt;
//! use stanza_provider_ollama::Ollama;
//! use stanza_types::{ModelInput, QueryType};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Ollama::from_env().into_provider();
//! let mut text = provider
//!     .stream_text(QueryType::Completion, ModelInput::default())
//!     .await?;
//! while let Some(fragment) = text.next().await {
//!     print!("{}", fragment?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - Endpoint selection per [`QueryType`] (`/chat` vs `/generate`)
//! - Pull-based chunk streaming with per-call cancellation
//! - Pure per-chunk decoding (one JSON record per chunk)
//! - Raw-text upstream errors, as Ollama reports them
//! - No auth, no retry, no timeout (Ollama is local)

pub mod client;
pub mod decode;
mod streaming;

pub use client::{BASE_URL_ENV, Ollama};
pub use decode::decode_chunk;

// Re-export stanza-types for convenience
pub use stanza_types::{
    CancelHandle, ChunkStream, DecodeError, DispatchError, ModelInput, ModelProvider,
    ProviderError, QueryType, StreamedChunk,
};

/// Default model used when neither the caller nor the provider overrides it.
pub const DEFAULT_MODEL: &str = "llama2";
