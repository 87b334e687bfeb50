//! Portfolio Domain
//!
//! Profiles, titles, projects and tags behind the `/api/v1/profile`
//! surface. Project description texts are handed to the embeddings domain
//! as pending records; the background worker turns them into vectors.

pub mod entities;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{PortfolioError, PortfolioResult};
pub use models::{
    AttachTags, AttachTitles, CreateProject, CreateTag, CreateTitle, DescriptionInput, Profile,
    Project, ProjectStatus, Tag, Title, UpsertProfile,
};
pub use postgres::PgPortfolioRepository;
pub use repository::{
    InMemoryPortfolioRepository, ProfileRepository, ProjectRepository, TagRepository,
    TitleRepository,
};
pub use service::PortfolioService;
