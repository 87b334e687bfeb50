//! Embedding Worker
//!
//! Polls the store for project descriptions whose embedding vector is
//! still unset, encodes each text and commits the vectors one record at
//! a time.

use std::sync::Arc;

use clap::Parser;
use core_config::Environment;
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::FromEnv;
use eyre::Result;
use tokio::sync::watch;
use tracing::info;

mod config;
mod worker;

use config::{EncoderConfig, WorkerConfig};
use domain_embeddings::{
    EmbeddingRepository, HashEncoder, MiniLmEncoder, PgEmbeddingRepository, TextEncoder,
};
use worker::EmbeddingWorker;

#[derive(Parser)]
#[command(name = "embedding-worker")]
#[command(about = "Embed pending project description texts")]
struct Cli {
    /// Run a single pass over the pending records and exit
    #[arg(long)]
    once: bool,
}

fn build_encoder(config: &EncoderConfig) -> Result<Arc<dyn TextEncoder>> {
    match config {
        EncoderConfig::MiniLm { model_dir } => {
            let encoder = MiniLmEncoder::load(model_dir)
                .map_err(|e| eyre::eyre!("Encoder initialization failed: {}", e))?;
            Ok(Arc::new(encoder))
        }
        EncoderConfig::Hash => {
            info!("Using deterministic hash encoder");
            Ok(Arc::new(HashEncoder::new()))
        }
    }
}

/// Flip the shutdown flag on SIGINT or SIGTERM
async fn watch_for_shutdown(tx: watch::Sender<bool>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }

    let _ = tx.send(true);
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let cli = Cli::parse();
    let config = WorkerConfig::from_env()?;

    // Encoder init failure is fatal; there is no degraded mode
    let encoder = build_encoder(&config.encoder)?;

    info!("Connecting to database...");
    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("Database connection failed: {}", e))?;

    let repository: Arc<dyn EmbeddingRepository> = Arc::new(PgEmbeddingRepository::new(db));
    let worker = EmbeddingWorker::new(
        repository,
        encoder,
        config.poll_interval(),
        config.error_interval(),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    if cli.once {
        let summary = worker
            .run_iteration(&shutdown_rx)
            .await
            .map_err(|e| eyre::eyre!("Pass failed: {}", e))?;
        info!(
            found = summary.found,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Single pass complete"
        );
        return Ok(());
    }

    tokio::spawn(watch_for_shutdown(shutdown_tx));
    worker.run(shutdown_rx).await;

    Ok(())
}
