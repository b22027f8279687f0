//! Course Assistant - HTTP Server Entry Point
//!
//! Indexes the course corpus and starts the HTTP server.

use std::sync::Arc;

use course_assistant::{api, config::Config, llm::AnthropicClient, rag::RagSystem};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "course_assistant=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.model);

    let llm = Arc::new(AnthropicClient::new(
        config.api_key.clone(),
        config.model.clone(),
        config.base_url.clone(),
    ));
    let rag = Arc::new(RagSystem::new(&config, llm));

    // Index the course corpus before accepting queries
    let (courses, chunks) = rag.add_course_folder(&config.docs_path, false).await?;
    info!("Indexed {} courses ({} chunks)", courses, chunks);

    api::serve(&config, rag).await?;

    Ok(())
}
