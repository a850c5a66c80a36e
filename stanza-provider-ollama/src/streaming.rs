//! Pull-based chunk streaming for dispatched requests.
//!
//! The response body is consumed one chunk per poll, so the consumer's
//! demand drives network reads. Chunk boundaries are whatever the
//! transport delivered; nothing here re-frames or buffers across chunks.

use async_stream::stream;
use futures::StreamExt;
use reqwest::Response;
use stanza_types::{CancelHandle, ChunkStream, DispatchError};
use tokio_util::sync::CancellationToken;

/// Wrap an HTTP response body into a [`ChunkStream`] observing `token`.
///
/// The stream ends when the body is exhausted, when a read fails (the
/// error is yielded as the final element), or when `token` is cancelled.
/// When cancellation and a ready chunk race, cancellation wins.
pub(crate) fn chunk_stream(response: Response, token: CancellationToken) -> ChunkStream {
    let cancel = CancelHandle::new(token.clone());
    let receiver = stream! {
        let mut body = std::pin::pin!(response.bytes_stream());
        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                chunk = body.next() => match chunk {
                    Some(Ok(bytes)) => yield Ok(bytes),
                    Some(Err(e)) => {
                        yield Err(DispatchError::Network(Box::new(e)));
                        break;
                    }
                    None => break,
                },
            }
        }
    };
    ChunkStream {
        receiver: Box::pin(receiver),
        cancel,
    }
}
