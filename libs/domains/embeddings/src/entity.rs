use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{CreateEmbeddingRecord, EmbeddingRecord, EmbeddingType};

/// Sea-ORM Entity for the project_embeddings table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "project_embeddings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub project_id: i32,
    pub embedding_type: EmbeddingType,
    #[sea_orm(column_type = "Text")]
    pub raw_text: String,
    /// pgvector column, NULL until the worker commits
    pub embedding: Option<PgVector>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for EmbeddingRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            project_id: model.project_id,
            embedding_type: model.embedding_type,
            raw_text: model.raw_text,
            embedding: model.embedding.map(|v| v.to_vec()),
            created_at: model.created_at.into(),
        }
    }
}

impl From<CreateEmbeddingRecord> for ActiveModel {
    fn from(input: CreateEmbeddingRecord) -> Self {
        ActiveModel {
            project_id: Set(input.project_id),
            embedding_type: Set(input.embedding_type),
            raw_text: Set(input.text),
            embedding: Set(None),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
    }
}
