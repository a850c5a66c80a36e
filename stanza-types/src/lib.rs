#![deny(missing_docs)]
//! Shared types for the stanza model-provider layer.
//!
//! Hosts the pieces every backend crate builds on: [`QueryType`] and
//! [`ModelInput`] for requests, [`ChunkStream`] for pull-based response
//! bodies, the error taxonomy, and the generic [`ModelProvider`]
//! capability that binds a backend's query function and chunk decoder
//! together.

pub mod error;
pub mod provider;
pub mod stream;
pub mod types;

pub use error::*;
pub use provider::*;
pub use stream::*;
pub use types::*;
