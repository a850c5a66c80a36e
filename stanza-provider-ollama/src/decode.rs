//! Pure per-chunk decoding of Ollama stream records.
//!
//! Ollama emits one JSON record per streamed chunk:
//! ```text
//! {"model":"llama2","message":{"role":"assistant","content":"Hello"},"done":false}
//! {"model":"llama2","response":"Hello","done":false}
//! ```
//! The chat envelope carries the text under `message.content`, the
//! completion envelope under `response`.

use stanza_types::{DecodeError, QueryType, StreamedChunk};

/// Extract the textual content from one streamed chunk.
///
/// Text chunks pass through unchanged regardless of query type. Byte
/// chunks must hold exactly one UTF-8 JSON record in the envelope for
/// `query_type`; a chunk split mid-record fails here rather than being
/// buffered. Pure and deterministic: no state survives between calls.
pub fn decode_chunk(chunk: &StreamedChunk, query_type: QueryType) -> Result<String, DecodeError> {
    let bytes = match chunk {
        StreamedChunk::Text(text) => return Ok(text.clone()),
        StreamedChunk::Bytes(bytes) => bytes,
    };

    let text = std::str::from_utf8(bytes)?;
    let record: serde_json::Value = serde_json::from_str(text)?;

    let (value, field) = match query_type {
        QueryType::Chat => (&record["message"]["content"], "message.content"),
        QueryType::Completion => (&record["response"], "response"),
    };
    value
        .as_str()
        .map(str::to_string)
        .ok_or(DecodeError::MissingField(field))
}
