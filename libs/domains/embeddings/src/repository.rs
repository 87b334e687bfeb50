use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use crate::error::{EmbeddingError, EmbeddingResult};
use crate::models::{CreateEmbeddingRecord, EMBEDDING_DIM, EmbeddingRecord, EmbeddingType};

/// Repository trait for embedding record persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingRepository: Send + Sync {
    /// Enqueue a new record with an unset vector
    async fn create(&self, input: CreateEmbeddingRecord) -> EmbeddingResult<EmbeddingRecord>;

    /// Get a record by ID
    async fn get_by_id(&self, id: i32) -> EmbeddingResult<Option<EmbeddingRecord>>;

    /// All records for a project, committed or not
    async fn list_by_project(&self, project_id: i32) -> EmbeddingResult<Vec<EmbeddingRecord>>;

    /// Records whose vector is still unset, ordered by ID ascending
    async fn fetch_pending(&self) -> EmbeddingResult<Vec<EmbeddingRecord>>;

    /// Store a vector on a record whose vector is still unset.
    ///
    /// Returns false when the record already has a vector; a committed
    /// vector is never overwritten.
    async fn commit_embedding(&self, record_id: i32, vector: Vec<f32>) -> EmbeddingResult<bool>;
}

pub(crate) fn check_dimension(vector: &[f32]) -> EmbeddingResult<()> {
    if vector.len() != EMBEDDING_DIM {
        return Err(EmbeddingError::DimensionMismatch {
            expected: EMBEDDING_DIM,
            actual: vector.len(),
        });
    }
    Ok(())
}

/// In-memory implementation of EmbeddingRepository (for development/testing)
#[derive(Debug, Default)]
pub struct InMemoryEmbeddingRepository {
    records: Arc<RwLock<HashMap<i32, EmbeddingRecord>>>,
    next_id: AtomicI32,
}

impl InMemoryEmbeddingRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl EmbeddingRepository for InMemoryEmbeddingRepository {
    async fn create(&self, input: CreateEmbeddingRecord) -> EmbeddingResult<EmbeddingRecord> {
        let mut records = self.records.write().await;

        let pair_exists = records.values().any(|r| {
            r.project_id == input.project_id && r.embedding_type == input.embedding_type
        });
        if pair_exists {
            return Err(EmbeddingError::DuplicatePair {
                project_id: input.project_id,
                embedding_type: input.embedding_type,
            });
        }

        let record = EmbeddingRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            project_id: input.project_id,
            embedding_type: input.embedding_type,
            raw_text: input.text,
            embedding: None,
            created_at: Utc::now(),
        };
        records.insert(record.id, record.clone());

        tracing::info!(record_id = record.id, "Created embedding record");
        Ok(record)
    }

    async fn get_by_id(&self, id: i32) -> EmbeddingResult<Option<EmbeddingRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn list_by_project(&self, project_id: i32) -> EmbeddingResult<Vec<EmbeddingRecord>> {
        let records = self.records.read().await;
        let mut result: Vec<EmbeddingRecord> = records
            .values()
            .filter(|r| r.project_id == project_id)
            .cloned()
            .collect();
        result.sort_by_key(|r| r.id);
        Ok(result)
    }

    async fn fetch_pending(&self) -> EmbeddingResult<Vec<EmbeddingRecord>> {
        let records = self.records.read().await;
        let mut result: Vec<EmbeddingRecord> = records
            .values()
            .filter(|r| r.is_pending())
            .cloned()
            .collect();
        result.sort_by_key(|r| r.id);
        Ok(result)
    }

    async fn commit_embedding(&self, record_id: i32, vector: Vec<f32>) -> EmbeddingResult<bool> {
        check_dimension(&vector)?;

        let mut records = self.records.write().await;
        let record = records
            .get_mut(&record_id)
            .ok_or(EmbeddingError::NotFound(record_id))?;

        if record.embedding.is_some() {
            tracing::warn!(record_id, "Record already has a vector, skipping commit");
            return Ok(false);
        }

        record.embedding = Some(vector);
        tracing::info!(record_id, "Committed embedding vector");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(project_id: i32, embedding_type: EmbeddingType) -> CreateEmbeddingRecord {
        CreateEmbeddingRecord {
            project_id,
            embedding_type,
            text: "a search service built on tantivy".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_record() {
        let repo = InMemoryEmbeddingRepository::new();

        let record = repo
            .create(input(1, EmbeddingType::Overview))
            .await
            .unwrap();
        assert!(record.is_pending());

        let fetched = repo.get_by_id(record.id).await.unwrap();
        assert_eq!(fetched.unwrap().project_id, 1);
    }

    #[tokio::test]
    async fn test_duplicate_pair_rejected() {
        let repo = InMemoryEmbeddingRepository::new();

        repo.create(input(1, EmbeddingType::Overview)).await.unwrap();

        let result = repo.create(input(1, EmbeddingType::Overview)).await;
        assert!(matches!(result, Err(EmbeddingError::DuplicatePair { .. })));

        // Same type for a different project is fine
        repo.create(input(2, EmbeddingType::Overview)).await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_pending_ordered_and_filtered() {
        let repo = InMemoryEmbeddingRepository::new();

        let first = repo.create(input(1, EmbeddingType::Overview)).await.unwrap();
        let second = repo.create(input(1, EmbeddingType::Features)).await.unwrap();
        let third = repo.create(input(2, EmbeddingType::Overview)).await.unwrap();

        repo.commit_embedding(second.id, vec![0.5; EMBEDDING_DIM])
            .await
            .unwrap();

        let pending = repo.fetch_pending().await.unwrap();
        let ids: Vec<i32> = pending.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first.id, third.id]);
    }

    #[tokio::test]
    async fn test_commit_never_overwrites() {
        let repo = InMemoryEmbeddingRepository::new();
        let record = repo.create(input(1, EmbeddingType::TechStack)).await.unwrap();

        let committed = repo
            .commit_embedding(record.id, vec![1.0; EMBEDDING_DIM])
            .await
            .unwrap();
        assert!(committed);

        let again = repo
            .commit_embedding(record.id, vec![2.0; EMBEDDING_DIM])
            .await
            .unwrap();
        assert!(!again);

        let stored = repo.get_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(stored.embedding.unwrap()[0], 1.0);
    }

    #[tokio::test]
    async fn test_commit_rejects_wrong_dimension() {
        let repo = InMemoryEmbeddingRepository::new();
        let record = repo.create(input(1, EmbeddingType::Overview)).await.unwrap();

        let result = repo.commit_embedding(record.id, vec![1.0; 3]).await;
        assert!(matches!(
            result,
            Err(EmbeddingError::DimensionMismatch { expected: 384, actual: 3 })
        ));
    }

    #[tokio::test]
    async fn test_commit_missing_record() {
        let repo = InMemoryEmbeddingRepository::new();
        let result = repo.commit_embedding(42, vec![0.0; EMBEDDING_DIM]).await;
        assert!(matches!(result, Err(EmbeddingError::NotFound(42))));
    }
}
