use std::sync::Arc;

use crate::encoder::{EncoderError, TextEncoder};
use crate::error::EmbeddingError;
use crate::models::EmbeddingRecord;
use crate::repository::EmbeddingRepository;

/// What happened to a single record during one worker pass.
///
/// A failed record is left pending and retried on a later pass; it never
/// aborts the batch.
#[derive(Debug)]
pub enum RecordOutcome {
    /// Vector encoded and committed
    Embedded,
    /// Record already had a vector by the time the commit ran
    Skipped,
    /// Encoder rejected the text
    EncodingFailed(EncoderError),
    /// Vector produced but the store rejected the commit
    CommitFailed(EmbeddingError),
}

impl RecordOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RecordOutcome::Embedded | RecordOutcome::Skipped)
    }
}

/// Encodes one record's text and commits the vector.
pub struct RecordProcessor {
    repository: Arc<dyn EmbeddingRepository>,
    encoder: Arc<dyn TextEncoder>,
}

impl RecordProcessor {
    pub fn new(repository: Arc<dyn EmbeddingRepository>, encoder: Arc<dyn TextEncoder>) -> Self {
        Self {
            repository,
            encoder,
        }
    }

    pub async fn process(&self, record: &EmbeddingRecord) -> RecordOutcome {
        let vector = match self.encoder.encode(&record.raw_text) {
            Ok(vector) => vector,
            Err(err) => {
                tracing::warn!(
                    record_id = record.id,
                    project_id = record.project_id,
                    error = %err,
                    "Failed to encode record text"
                );
                return RecordOutcome::EncodingFailed(err);
            }
        };

        match self.repository.commit_embedding(record.id, vector).await {
            Ok(true) => {
                tracing::debug!(record_id = record.id, "Embedded record");
                RecordOutcome::Embedded
            }
            Ok(false) => RecordOutcome::Skipped,
            Err(err) => {
                tracing::warn!(
                    record_id = record.id,
                    error = %err,
                    "Failed to commit embedding vector"
                );
                RecordOutcome::CommitFailed(err)
            }
        }
    }
}
