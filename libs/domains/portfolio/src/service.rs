use std::sync::Arc;
use validator::Validate;

use domain_embeddings::{CreateEmbeddingRecord, EmbeddingRecord, EmbeddingRepository};

use crate::error::{PortfolioError, PortfolioResult};
use crate::models::{
    AttachTags, AttachTitles, CreateProject, CreateTag, CreateTitle, DescriptionInput, Profile,
    Project, Tag, Title, UpsertProfile,
};
use crate::repository::{ProfileRepository, ProjectRepository, TagRepository, TitleRepository};

/// Service layer for the portfolio profile surface.
///
/// Project description texts pass through here into the embedding queue;
/// the background worker picks them up from there.
#[derive(Clone)]
pub struct PortfolioService {
    profiles: Arc<dyn ProfileRepository>,
    titles: Arc<dyn TitleRepository>,
    projects: Arc<dyn ProjectRepository>,
    tags: Arc<dyn TagRepository>,
    embeddings: Arc<dyn EmbeddingRepository>,
}

impl PortfolioService {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        titles: Arc<dyn TitleRepository>,
        projects: Arc<dyn ProjectRepository>,
        tags: Arc<dyn TagRepository>,
        embeddings: Arc<dyn EmbeddingRepository>,
    ) -> Self {
        Self {
            profiles,
            titles,
            projects,
            tags,
            embeddings,
        }
    }

    pub async fn upsert_profile(
        &self,
        user_id: &str,
        input: UpsertProfile,
    ) -> PortfolioResult<Profile> {
        input
            .validate()
            .map_err(|e| PortfolioError::Validation(e.to_string()))?;

        self.profiles.upsert(user_id, input).await
    }

    pub async fn get_profile(&self, user_id: &str) -> PortfolioResult<Profile> {
        self.profiles
            .get_by_user(user_id)
            .await?
            .ok_or_else(|| PortfolioError::ProfileNotFound(user_id.to_string()))
    }

    pub async fn create_title(&self, user_id: &str, input: CreateTitle) -> PortfolioResult<Title> {
        input
            .validate()
            .map_err(|e| PortfolioError::Validation(e.to_string()))?;

        self.titles.create(user_id, input).await
    }

    pub async fn list_titles(&self, user_id: &str) -> PortfolioResult<Vec<Title>> {
        self.titles.list_by_user(user_id).await
    }

    /// Create a project and enqueue its description texts for embedding
    pub async fn create_project(
        &self,
        user_id: &str,
        input: CreateProject,
    ) -> PortfolioResult<Project> {
        input
            .validate()
            .map_err(|e| PortfolioError::Validation(e.to_string()))?;

        let descriptions = input.descriptions.clone();
        let project = self.projects.create(user_id, input).await?;

        for description in descriptions {
            self.enqueue_description(project.id, description).await?;
        }

        Ok(project)
    }

    pub async fn list_projects(&self, user_id: &str) -> PortfolioResult<Vec<Project>> {
        self.projects.list_by_user(user_id).await
    }

    /// Attach a description text to an existing project.
    ///
    /// A second description of the same type for the same project is
    /// rejected with a conflict; there is no replace or re-queue path.
    pub async fn add_description(
        &self,
        project_id: i32,
        input: DescriptionInput,
    ) -> PortfolioResult<EmbeddingRecord> {
        input
            .validate()
            .map_err(|e| PortfolioError::Validation(e.to_string()))?;

        self.require_project(project_id).await?;
        self.enqueue_description(project_id, input).await
    }

    pub async fn list_descriptions(&self, project_id: i32) -> PortfolioResult<Vec<EmbeddingRecord>> {
        self.require_project(project_id).await?;
        Ok(self.embeddings.list_by_project(project_id).await?)
    }

    pub async fn create_tag(&self, input: CreateTag) -> PortfolioResult<Tag> {
        input
            .validate()
            .map_err(|e| PortfolioError::Validation(e.to_string()))?;

        self.tags.get_or_create(&input.name).await
    }

    pub async fn list_tags(&self) -> PortfolioResult<Vec<Tag>> {
        self.tags.list().await
    }

    /// Idempotently link existing titles to a project
    pub async fn attach_titles(
        &self,
        project_id: i32,
        input: AttachTitles,
    ) -> PortfolioResult<()> {
        input
            .validate()
            .map_err(|e| PortfolioError::Validation(e.to_string()))?;

        self.require_project(project_id).await?;

        let found = self.titles.get_by_ids(&input.title_ids).await?;
        for title_id in &input.title_ids {
            if !found.iter().any(|t| t.id == *title_id) {
                return Err(PortfolioError::TitleNotFound(*title_id));
            }
        }

        self.projects.attach_titles(project_id, &input.title_ids).await
    }

    /// Get-or-create tags by name and idempotently link them to a project
    pub async fn attach_tags(&self, project_id: i32, input: AttachTags) -> PortfolioResult<()> {
        input
            .validate()
            .map_err(|e| PortfolioError::Validation(e.to_string()))?;

        self.require_project(project_id).await?;

        let mut tag_ids = Vec::with_capacity(input.tags.len());
        for name in &input.tags {
            let tag = self.tags.get_or_create(name).await?;
            tag_ids.push(tag.id);
        }

        self.projects.attach_tags(project_id, &tag_ids).await
    }

    async fn require_project(&self, project_id: i32) -> PortfolioResult<Project> {
        self.projects
            .get_by_id(project_id)
            .await?
            .ok_or(PortfolioError::ProjectNotFound(project_id))
    }

    async fn enqueue_description(
        &self,
        project_id: i32,
        input: DescriptionInput,
    ) -> PortfolioResult<EmbeddingRecord> {
        let record = self
            .embeddings
            .create(CreateEmbeddingRecord {
                project_id,
                embedding_type: input.embedding_type,
                text: input.text,
            })
            .await?;

        Ok(record)
    }
}
