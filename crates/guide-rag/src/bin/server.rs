//! Guide question-answering server binary
//!
//! Run with: cargo run -p guide-rag --bin guide-rag-server

use guide_rag::{config::RagConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "guide_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                   User Guide Assistant                    ║
║         Ask questions, get answers from the guide         ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration
    let config = RagConfig::load()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.openai.embed_model);
    tracing::info!("  - Generation model: {}", config.openai.generate_model);
    tracing::info!("  - Index directory: {}", config.index.dir.display());
    tracing::info!("  - Chunks per question: {}", config.retrieval.top_k);

    // Create and start server
    let server = RagServer::new(config).await?;

    println!("\nServer starting...");
    println!("  Page:   http://{}/", server.address());
    println!("  Ask:    http://{}/ask", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
