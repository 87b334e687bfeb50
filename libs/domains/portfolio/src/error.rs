use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_embeddings::EmbeddingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("Profile not found for user '{0}'")]
    ProfileNotFound(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(i32),

    #[error("Title not found: {0}")]
    TitleNotFound(i32),

    #[error("Title '{0}' already exists for this user")]
    DuplicateTitle(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type PortfolioResult<T> = Result<T, PortfolioError>;

impl From<EmbeddingError> for PortfolioError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::DuplicatePair { .. } => PortfolioError::Conflict(err.to_string()),
            EmbeddingError::Validation(msg) => PortfolioError::Validation(msg),
            EmbeddingError::Database(msg) => PortfolioError::Database(msg),
            other => PortfolioError::Database(other.to_string()),
        }
    }
}

/// Convert PortfolioError to AppError for standardized error responses
impl From<PortfolioError> for AppError {
    fn from(err: PortfolioError) -> Self {
        match err {
            PortfolioError::ProfileNotFound(user_id) => {
                AppError::NotFound(format!("Profile not found for user '{}'", user_id))
            }
            PortfolioError::ProjectNotFound(id) => {
                AppError::NotFound(format!("Project {} not found", id))
            }
            PortfolioError::TitleNotFound(id) => {
                AppError::NotFound(format!("Title {} not found", id))
            }
            PortfolioError::DuplicateTitle(name) => {
                AppError::Conflict(format!("Title '{}' already exists", name))
            }
            PortfolioError::Conflict(msg) => AppError::Conflict(msg),
            PortfolioError::Validation(msg) => AppError::BadRequest(msg),
            PortfolioError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for PortfolioError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
