//! Basic streaming usage of the Ollama provider.
//!
//! Make sure Ollama is running locally and run:
//!   cargo run --example basic

use futures::StreamExt;
use stanza_provider_ollama::Ollama;
use stanza_types::{ModelInput, QueryType};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let provider = Ollama::from_env().into_provider();

    // Model left empty: the provider fills in its default (llama2).
    let input = ModelInput::default()
        .with_option("prompt", "Say hello in one sentence.")
        .with_option("stream", true);

    let mut text = provider.stream_text(QueryType::Completion, input).await?;
    while let Some(fragment) = text.next().await {
        print!("{}", fragment?);
    }
    println!();

    Ok(())
}
