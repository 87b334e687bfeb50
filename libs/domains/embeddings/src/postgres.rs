use async_trait::async_trait;
use sea_orm::entity::prelude::PgVector;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::{EmbeddingError, EmbeddingResult},
    models::{CreateEmbeddingRecord, EmbeddingRecord},
    repository::{EmbeddingRepository, check_dimension},
};

pub struct PgEmbeddingRepository {
    db: DatabaseConnection,
}

impl PgEmbeddingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmbeddingRepository for PgEmbeddingRepository {
    async fn create(&self, input: CreateEmbeddingRecord) -> EmbeddingResult<EmbeddingRecord> {
        let pair_exists = entity::Entity::find()
            .filter(entity::Column::ProjectId.eq(input.project_id))
            .filter(entity::Column::EmbeddingType.eq(input.embedding_type))
            .one(&self.db)
            .await
            .map_err(|e| EmbeddingError::Database(e.to_string()))?
            .is_some();

        if pair_exists {
            return Err(EmbeddingError::DuplicatePair {
                project_id: input.project_id,
                embedding_type: input.embedding_type,
            });
        }

        let active_model: entity::ActiveModel = input.into();
        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| EmbeddingError::Database(e.to_string()))?;

        tracing::info!(record_id = model.id, "Created embedding record");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> EmbeddingResult<Option<EmbeddingRecord>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EmbeddingError::Database(e.to_string()))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list_by_project(&self, project_id: i32) -> EmbeddingResult<Vec<EmbeddingRecord>> {
        let models = entity::Entity::find()
            .filter(entity::Column::ProjectId.eq(project_id))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EmbeddingError::Database(e.to_string()))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn fetch_pending(&self) -> EmbeddingResult<Vec<EmbeddingRecord>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Embedding.is_null())
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EmbeddingError::Database(e.to_string()))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn commit_embedding(&self, record_id: i32, vector: Vec<f32>) -> EmbeddingResult<bool> {
        check_dimension(&vector)?;

        // Guarded update: only rows with an unset vector are touched, so a
        // committed vector is never overwritten even under races.
        let result = entity::Entity::update_many()
            .col_expr(
                entity::Column::Embedding,
                sea_orm::sea_query::Expr::value(PgVector::from(vector)),
            )
            .filter(entity::Column::Id.eq(record_id))
            .filter(entity::Column::Embedding.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| EmbeddingError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            let exists = entity::Entity::find_by_id(record_id)
                .one(&self.db)
                .await
                .map_err(|e| EmbeddingError::Database(e.to_string()))?
                .is_some();

            if !exists {
                return Err(EmbeddingError::NotFound(record_id));
            }

            tracing::warn!(record_id, "Record already has a vector, skipping commit");
            return Ok(false);
        }

        tracing::info!(record_id, "Committed embedding vector");
        Ok(true)
    }
}
