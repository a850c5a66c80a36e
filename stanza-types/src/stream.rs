//! Pull-based chunk stream with an explicit cancellation handle.

use std::pin::Pin;

use bytes::Bytes;
use futures::Stream;
use tokio_util::sync::CancellationToken;

use crate::error::DispatchError;

/// Handle for cancelling an in-flight dispatch.
///
/// One-shot and scoped to a single request: cancelling stops further chunk
/// delivery on the paired [`ChunkStream`] and is not reusable across calls.
/// Cancellation is not an error; the stream simply ends.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    /// Wrap a token. Backends create one token per dispatch.
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    /// Stop delivery of further chunks.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether cancellation has been triggered.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Byte-chunk stream from a dispatched request.
///
/// Pull-based: each chunk is read from the network only when the consumer
/// polls for it, so the consumer's demand drives further reads. Chunks
/// arrive in server order. Consume with `StreamExt::next()`.
pub struct ChunkStream {
    /// The stream of body chunks, in server order.
    pub receiver: Pin<Box<dyn Stream<Item = Result<Bytes, DispatchError>> + Send>>,
    /// Cancellation handle for early termination without draining.
    pub cancel: CancelHandle,
}

impl std::fmt::Debug for ChunkStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkStream")
            .field("receiver", &"<stream>")
            .field("cancel", &self.cancel)
            .finish()
    }
}
