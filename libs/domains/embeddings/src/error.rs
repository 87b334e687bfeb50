use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::models::EmbeddingType;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Embedding record not found: {0}")]
    NotFound(i32),

    #[error("Embedding of type '{embedding_type}' already exists for project {project_id}")]
    DuplicatePair {
        project_id: i32,
        embedding_type: EmbeddingType,
    },

    #[error("Expected a {expected}-dimensional vector, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// Convert EmbeddingError to AppError for standardized error responses
impl From<EmbeddingError> for AppError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::NotFound(id) => {
                AppError::NotFound(format!("Embedding record {} not found", id))
            }
            EmbeddingError::DuplicatePair {
                project_id,
                embedding_type,
            } => AppError::Conflict(format!(
                "Embedding of type '{}' already exists for project {}",
                embedding_type, project_id
            )),
            EmbeddingError::DimensionMismatch { expected, actual } => AppError::BadRequest(
                format!("Expected a {}-dimensional vector, got {}", expected, actual),
            ),
            EmbeddingError::Validation(msg) => AppError::BadRequest(msg),
            EmbeddingError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for EmbeddingError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
