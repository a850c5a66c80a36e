//! Integration tests for the Ollama provider using wiremock.

use bytes::Bytes;
use futures::StreamExt;
use stanza_provider_ollama::Ollama;
use stanza_types::{DispatchError, ModelInput, ProviderError, QueryType};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_record() -> &'static str {
    r#"{"model":"llama2","message":{"role":"assistant","content":"hi"},"done":false}"#
}

fn completion_record() -> &'static str {
    r#"{"model":"llama2","response":"hi","done":false}"#
}

#[tokio::test]
async fn chat_dispatch_targets_chat_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string(chat_record()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Ollama::new().base_url(mock_server.uri());
    let result = client
        .dispatch(QueryType::Chat, &ModelInput::new("llama2"))
        .await;
    assert!(result.is_ok(), "expected Ok, got: {:?}", result.err());
}

#[tokio::test]
async fn completion_dispatch_targets_generate_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string(completion_record()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Ollama::new().base_url(mock_server.uri());
    let result = client
        .dispatch(QueryType::Completion, &ModelInput::new("llama2"))
        .await;
    assert!(result.is_ok(), "expected Ok, got: {:?}", result.err());
}

#[tokio::test]
async fn dispatch_passes_the_payload_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(body_partial_json(serde_json::json!({
            "model": "mistral",
            "prompt": "Say hello",
            "options": { "seed": 42 },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(completion_record()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let input = ModelInput::new("mistral")
        .with_option("prompt", "Say hello")
        .with_option("options", serde_json::json!({ "seed": 42 }));

    let client = Ollama::new().base_url(mock_server.uri());
    let result = client.dispatch(QueryType::Completion, &input).await;
    assert!(result.is_ok(), "expected Ok, got: {:?}", result.err());
}

#[tokio::test]
async fn dispatch_yields_the_body_bytes_in_order() {
    let mock_server = MockServer::start().await;

    let body = concat!(
        r#"{"model":"llama2","response":"Hello","done":false}"#,
        "\n",
        r#"{"model":"llama2","response":" world","done":true}"#,
        "\n",
    );

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;

    let client = Ollama::new().base_url(mock_server.uri());
    let stream = client
        .dispatch(QueryType::Completion, &ModelInput::new("llama2"))
        .await
        .expect("dispatch succeeds");

    let chunks: Vec<Bytes> = stream
        .receiver
        .map(|c| c.expect("no transport errors"))
        .collect()
        .await;
    let joined: Vec<u8> = chunks.concat();
    assert_eq!(joined, body.as_bytes());
}

#[tokio::test]
async fn non_ok_status_is_an_upstream_error_with_the_raw_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model 'nope' not found"))
        .mount(&mock_server)
        .await;

    let client = Ollama::new().base_url(mock_server.uri());
    let err = client
        .dispatch(QueryType::Chat, &ModelInput::new("nope"))
        .await
        .unwrap_err();

    assert!(
        matches!(err, DispatchError::Upstream(ref text) if text == "model 'nope' not found"),
        "expected Upstream with raw body, got: {err:?}"
    );
}

#[tokio::test]
async fn ok_status_with_empty_body_is_an_upstream_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = Ollama::new().base_url(mock_server.uri());
    let err = client
        .dispatch(QueryType::Chat, &ModelInput::new("llama2"))
        .await
        .unwrap_err();

    assert!(
        matches!(err, DispatchError::Upstream(ref text) if text.is_empty()),
        "expected Upstream with empty body, got: {err:?}"
    );
}

#[tokio::test]
async fn connection_failure_is_a_network_error() {
    // Nothing is listening on this port.
    let client = Ollama::new().base_url("http://127.0.0.1:9/api");
    let err = client
        .dispatch(QueryType::Chat, &ModelInput::new("llama2"))
        .await
        .unwrap_err();

    assert!(
        matches!(err, DispatchError::Network(_)),
        "expected Network, got: {err:?}"
    );
}

#[tokio::test]
async fn cancel_ends_the_stream_without_draining() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string(chat_record()))
        .mount(&mock_server)
        .await;

    let client = Ollama::new().base_url(mock_server.uri());
    let mut stream = client
        .dispatch(QueryType::Chat, &ModelInput::new("llama2"))
        .await
        .expect("dispatch succeeds");

    stream.cancel.cancel();
    assert!(stream.cancel.is_cancelled());
    assert!(
        stream.receiver.next().await.is_none(),
        "cancelled stream should yield nothing"
    );
}

#[tokio::test]
async fn stream_text_decodes_a_chat_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string(chat_record()))
        .mount(&mock_server)
        .await;

    let provider = Ollama::new().base_url(mock_server.uri()).into_provider();
    let text = provider
        .stream_text(QueryType::Chat, ModelInput::default())
        .await
        .expect("dispatch succeeds");

    let fragments: Vec<String> = text.map(|f| f.expect("decodes")).collect().await;
    assert_eq!(fragments, vec!["hi"]);
}

#[tokio::test]
async fn stream_text_decodes_a_completion_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string(completion_record()))
        .mount(&mock_server)
        .await;

    let provider = Ollama::new().base_url(mock_server.uri()).into_provider();
    let text = provider
        .stream_text(QueryType::Completion, ModelInput::default())
        .await
        .expect("dispatch succeeds");

    let fragments: Vec<String> = text.map(|f| f.expect("decodes")).collect().await;
    assert_eq!(fragments, vec!["hi"]);
}

#[tokio::test]
async fn stream_text_fills_the_default_model() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_partial_json(serde_json::json!({ "model": "llama2" })))
        .respond_with(ResponseTemplate::new(200).set_body_string(chat_record()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = Ollama::new().base_url(mock_server.uri()).into_provider();
    provider
        .stream_text(QueryType::Chat, ModelInput::default())
        .await
        .expect("dispatch succeeds");
}

#[tokio::test]
async fn stream_text_surfaces_a_decode_failure_at_the_bad_chunk() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&mock_server)
        .await;

    let provider = Ollama::new().base_url(mock_server.uri()).into_provider();
    let text = provider
        .stream_text(QueryType::Chat, ModelInput::default())
        .await
        .expect("dispatch itself succeeds");

    let items: Vec<Result<String, ProviderError>> = text.collect().await;
    assert_eq!(items.len(), 1);
    assert!(
        matches!(items[0], Err(ProviderError::Decode(_))),
        "expected Decode error, got: {:?}",
        items[0]
    );
}

#[tokio::test]
async fn stream_text_reports_a_dispatch_failure_as_err() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server on fire"))
        .mount(&mock_server)
        .await;

    let provider = Ollama::new().base_url(mock_server.uri()).into_provider();
    let err = provider
        .stream_text(QueryType::Chat, ModelInput::default())
        .await
        .err()
        .unwrap();

    assert!(
        matches!(err, DispatchError::Upstream(ref text) if text == "server on fire"),
        "expected Upstream, got: {err:?}"
    );
}
