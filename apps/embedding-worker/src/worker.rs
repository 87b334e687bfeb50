//! The embedding poll loop.
//!
//! Designed for a single worker instance. Running more than one is safe
//! because commits are guarded, but concurrent workers waste encoder time
//! on the same records.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use domain_embeddings::{
    EmbeddingError, EmbeddingRepository, RecordProcessor, TextEncoder,
};

/// Counters for one pass over the pending records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationSummary {
    pub found: usize,
    pub succeeded: usize,
    pub failed: usize,
}

pub struct EmbeddingWorker {
    repository: Arc<dyn EmbeddingRepository>,
    processor: RecordProcessor,
    poll_interval: Duration,
    error_interval: Duration,
}

impl EmbeddingWorker {
    pub fn new(
        repository: Arc<dyn EmbeddingRepository>,
        encoder: Arc<dyn TextEncoder>,
        poll_interval: Duration,
        error_interval: Duration,
    ) -> Self {
        Self {
            processor: RecordProcessor::new(repository.clone(), encoder),
            repository,
            poll_interval,
            error_interval,
        }
    }

    /// Run until the shutdown signal flips to true.
    ///
    /// Shutdown is honored at iteration boundaries and between records; an
    /// in-flight record finishes its commit before the loop stops.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            poll_interval_secs = self.poll_interval.as_secs(),
            error_interval_secs = self.error_interval.as_secs(),
            "Embedding worker started"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            let result = self.run_iteration(&shutdown).await;
            let sleep_for = self.next_interval(&result);

            match &result {
                Ok(summary) if summary.found > 0 => {
                    info!(
                        found = summary.found,
                        succeeded = summary.succeeded,
                        failed = summary.failed,
                        "Iteration complete"
                    );
                }
                Ok(_) => debug!("No pending records"),
                Err(err) => {
                    warn!(error = %err, "Failed to fetch pending records, backing off");
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(sleep_for) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Embedding worker stopped");
    }

    /// One pass: fetch the pending batch and process it record by record.
    ///
    /// A fetch failure aborts the pass; a per-record failure only counts
    /// against the summary and the record stays pending for the next pass.
    pub async fn run_iteration(
        &self,
        shutdown: &watch::Receiver<bool>,
    ) -> Result<IterationSummary, EmbeddingError> {
        let records = self.repository.fetch_pending().await?;

        let mut summary = IterationSummary {
            found: records.len(),
            succeeded: 0,
            failed: 0,
        };

        for record in &records {
            if *shutdown.borrow() {
                info!(
                    remaining = summary.found - summary.succeeded - summary.failed,
                    "Shutdown requested, leaving rest of batch pending"
                );
                break;
            }

            if self.processor.process(record).await.is_success() {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
            }
        }

        Ok(summary)
    }

    /// Poll interval after a clean pass, error interval after a fetch failure
    fn next_interval(&self, result: &Result<IterationSummary, EmbeddingError>) -> Duration {
        match result {
            Ok(_) => self.poll_interval,
            Err(_) => self.error_interval,
        }
    }
}
