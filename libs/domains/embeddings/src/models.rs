use chrono::{DateTime, Utc};
use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

/// Output dimensionality of the sentence encoder (all-MiniLM-L6-v2)
pub const EMBEDDING_DIM: usize = 384;

/// Which facet of a project the text describes
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EmbeddingType {
    /// High-level summary of the project
    #[sea_orm(string_value = "overview")]
    Overview,
    /// Feature list or capability description
    #[sea_orm(string_value = "features")]
    Features,
    /// Languages, frameworks and tooling
    #[sea_orm(string_value = "tech_stack")]
    TechStack,
}

/// A piece of project text queued for embedding.
///
/// The vector starts out unset; the background worker fills it in exactly
/// once and never overwrites a committed value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmbeddingRecord {
    pub id: i32,
    pub project_id: i32,
    pub embedding_type: EmbeddingType,
    pub raw_text: String,
    /// None until the worker commits a vector
    pub embedding: Option<Vec<f32>>,
    pub created_at: DateTime<Utc>,
}

impl EmbeddingRecord {
    /// A record is pending while its vector has not been committed
    pub fn is_pending(&self) -> bool {
        self.embedding.is_none()
    }
}

/// DTO for enqueueing project text for embedding
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEmbeddingRecord {
    pub project_id: i32,
    #[serde(rename = "type")]
    pub embedding_type: EmbeddingType,
    #[validate(length(min = 1, max = 10000))]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_type_serde_snake_case() {
        let json = serde_json::to_string(&EmbeddingType::TechStack).unwrap();
        assert_eq!(json, "\"tech_stack\"");

        let parsed: EmbeddingType = serde_json::from_str("\"overview\"").unwrap();
        assert_eq!(parsed, EmbeddingType::Overview);
    }

    #[test]
    fn test_record_pending_until_committed() {
        let mut record = EmbeddingRecord {
            id: 1,
            project_id: 7,
            embedding_type: EmbeddingType::Features,
            raw_text: "async worker pool".to_string(),
            embedding: None,
            created_at: Utc::now(),
        };
        assert!(record.is_pending());

        record.embedding = Some(vec![0.0; EMBEDDING_DIM]);
        assert!(!record.is_pending());
    }
}
