use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use fraudguard::config::Args;
use fraudguard::server::{run_server, AppState};
use fraudguard::Scorer;
use log::info;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fraudguard::init_logger();
    let args = Args::parse();

    info!("=== Starting fraudguard ===");
    let start_time = Instant::now();

    // Nothing is served until both resources are loaded.
    let scorer = Scorer::builder()
        .with_runtime_config(args.runtime_config())
        .with_model_file(&args.model, args.model_sha256.as_deref())
        .context("Failed to load model")?
        .with_vocabulary_file(&args.vocabulary, args.vocabulary_sha256.as_deref())
        .context("Failed to load vocabulary")?
        .build()?;

    let info = scorer.info();
    info!(
        "Scorer ready in {:.2?} ({} vocabulary entries, sequence length {})",
        start_time.elapsed(),
        info.vocabulary_size,
        info.sequence_length
    );

    let addr = args.bind_address()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    run_server(AppState::new(scorer), listener).await
}
