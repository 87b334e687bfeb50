use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::entities::{projects, tag_project, tags, title_project, titles, user_profiles};
use crate::error::{PortfolioError, PortfolioResult};
use crate::models::{
    CreateProject, CreateTitle, Profile, Project, Tag, Title, UpsertProfile,
};
use crate::repository::{ProfileRepository, ProjectRepository, TagRepository, TitleRepository};

fn db_err(e: sea_orm::DbErr) -> PortfolioError {
    PortfolioError::Database(e.to_string())
}

pub struct PgPortfolioRepository {
    db: DatabaseConnection,
}

impl PgPortfolioRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for PgPortfolioRepository {
    async fn upsert(&self, user_id: &str, input: UpsertProfile) -> PortfolioResult<Profile> {
        let existing = user_profiles::Entity::find()
            .filter(user_profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let model = match existing {
            Some(model) => {
                let mut active: user_profiles::ActiveModel = model.clone().into();
                active.name = Set(input.full_name);
                if input.email.is_some() {
                    active.email = Set(input.email);
                }
                active.headline = Set(input.headline);
                active.about_text = Set(input.bio);
                active.location = Set(input.location);
                active.years_of_experience = Set(input.years_of_experience);
                active.updated_at = Set(chrono::Utc::now().into());
                active.update(&self.db).await.map_err(db_err)?
            }
            None => {
                let active = user_profiles::ActiveModel {
                    user_id: Set(user_id.to_string()),
                    email: Set(input.email),
                    name: Set(input.full_name),
                    headline: Set(input.headline),
                    about_text: Set(input.bio),
                    location: Set(input.location),
                    years_of_experience: Set(input.years_of_experience),
                    profile_picture: Set(None),
                    created_at: Set(chrono::Utc::now().into()),
                    updated_at: Set(chrono::Utc::now().into()),
                    ..Default::default()
                };
                active.insert(&self.db).await.map_err(db_err)?
            }
        };

        tracing::info!(user_id, "Upserted profile");
        Ok(model.into())
    }

    async fn get_by_user(&self, user_id: &str) -> PortfolioResult<Option<Profile>> {
        let model = user_profiles::Entity::find()
            .filter(user_profiles::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(|m| m.into()))
    }
}

#[async_trait]
impl TitleRepository for PgPortfolioRepository {
    async fn create(&self, user_id: &str, input: CreateTitle) -> PortfolioResult<Title> {
        let name_exists = titles::Entity::find()
            .filter(titles::Column::UserId.eq(user_id))
            .filter(titles::Column::TitleName.eq(&input.name))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if name_exists {
            return Err(PortfolioError::DuplicateTitle(input.name));
        }

        let active = titles::ActiveModel {
            user_id: Set(user_id.to_string()),
            title_name: Set(input.name),
            description: Set(input.description),
            priority: Set(input.priority),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };
        let model = active.insert(&self.db).await.map_err(db_err)?;

        tracing::info!(title_id = model.id, "Created title");
        Ok(model.into())
    }

    async fn list_by_user(&self, user_id: &str) -> PortfolioResult<Vec<Title>> {
        let models = titles::Entity::find()
            .filter(titles::Column::UserId.eq(user_id))
            .order_by_asc(titles::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn get_by_ids(&self, ids: &[i32]) -> PortfolioResult<Vec<Title>> {
        let models = titles::Entity::find()
            .filter(titles::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

#[async_trait]
impl ProjectRepository for PgPortfolioRepository {
    async fn create(&self, user_id: &str, input: CreateProject) -> PortfolioResult<Project> {
        let active = projects::ActiveModel {
            user_id: Set(user_id.to_string()),
            name: Set(input.name),
            short_description: Set(input.short_description),
            repo_url: Set(input.repo_url),
            status: Set(input.status),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };
        let model = active.insert(&self.db).await.map_err(db_err)?;

        tracing::info!(project_id = model.id, "Created project");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> PortfolioResult<Option<Project>> {
        let model = projects::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(|m| m.into()))
    }

    async fn list_by_user(&self, user_id: &str) -> PortfolioResult<Vec<Project>> {
        let models = projects::Entity::find()
            .filter(projects::Column::UserId.eq(user_id))
            .order_by_asc(projects::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn attach_titles(&self, project_id: i32, title_ids: &[i32]) -> PortfolioResult<()> {
        if title_ids.is_empty() {
            return Ok(());
        }

        let links = title_ids.iter().map(|title_id| title_project::ActiveModel {
            title_id: Set(*title_id),
            project_id: Set(project_id),
        });

        // Existing pairs hit the composite PK and are skipped
        title_project::Entity::insert_many(links)
            .on_conflict(
                OnConflict::columns([
                    title_project::Column::TitleId,
                    title_project::Column::ProjectId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }

    async fn attach_tags(&self, project_id: i32, tag_ids: &[i32]) -> PortfolioResult<()> {
        if tag_ids.is_empty() {
            return Ok(());
        }

        let links = tag_ids.iter().map(|tag_id| tag_project::ActiveModel {
            tag_id: Set(*tag_id),
            project_id: Set(project_id),
        });

        tag_project::Entity::insert_many(links)
            .on_conflict(
                OnConflict::columns([
                    tag_project::Column::TagId,
                    tag_project::Column::ProjectId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }
}

#[async_trait]
impl TagRepository for PgPortfolioRepository {
    async fn get_or_create(&self, name: &str) -> PortfolioResult<Tag> {
        let existing = tags::Entity::find()
            .filter(tags::Column::TagName.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if let Some(model) = existing {
            return Ok(model.into());
        }

        let active = tags::ActiveModel {
            tag_name: Set(name.to_string()),
            ..Default::default()
        };
        let model = active.insert(&self.db).await.map_err(db_err)?;

        tracing::info!(tag_id = model.id, "Created tag");
        Ok(model.into())
    }

    async fn list(&self) -> PortfolioResult<Vec<Tag>> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}
