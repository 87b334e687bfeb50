use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use crate::error::{PortfolioError, PortfolioResult};
use crate::models::{
    CreateProject, CreateTitle, Profile, Project, Tag, Title, UpsertProfile,
};

/// Repository trait for profile persistence
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Create the profile on first write, update it afterwards
    async fn upsert(&self, user_id: &str, input: UpsertProfile) -> PortfolioResult<Profile>;

    async fn get_by_user(&self, user_id: &str) -> PortfolioResult<Option<Profile>>;
}

/// Repository trait for title persistence
#[async_trait]
pub trait TitleRepository: Send + Sync {
    /// Create a title; the (user, name) pair is unique
    async fn create(&self, user_id: &str, input: CreateTitle) -> PortfolioResult<Title>;

    async fn list_by_user(&self, user_id: &str) -> PortfolioResult<Vec<Title>>;

    async fn get_by_ids(&self, ids: &[i32]) -> PortfolioResult<Vec<Title>>;
}

/// Repository trait for project persistence and project links
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create(&self, user_id: &str, input: CreateProject) -> PortfolioResult<Project>;

    async fn get_by_id(&self, id: i32) -> PortfolioResult<Option<Project>>;

    async fn list_by_user(&self, user_id: &str) -> PortfolioResult<Vec<Project>>;

    /// Link titles to a project; already-linked pairs are left untouched
    async fn attach_titles(&self, project_id: i32, title_ids: &[i32]) -> PortfolioResult<()>;

    /// Link tags to a project; already-linked pairs are left untouched
    async fn attach_tags(&self, project_id: i32, tag_ids: &[i32]) -> PortfolioResult<()>;
}

/// Repository trait for the shared tag vocabulary
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Fetch a tag by name, creating it when absent
    async fn get_or_create(&self, name: &str) -> PortfolioResult<Tag>;

    async fn list(&self) -> PortfolioResult<Vec<Tag>>;
}

/// In-memory implementation of the portfolio repositories
/// (for development/testing)
#[derive(Debug, Default)]
pub struct InMemoryPortfolioRepository {
    profiles: Arc<RwLock<HashMap<String, Profile>>>,
    titles: Arc<RwLock<HashMap<i32, Title>>>,
    projects: Arc<RwLock<HashMap<i32, Project>>>,
    tags: Arc<RwLock<HashMap<i32, Tag>>>,
    title_links: Arc<RwLock<HashSet<(i32, i32)>>>,
    tag_links: Arc<RwLock<HashSet<(i32, i32)>>>,
    next_id: AtomicI32,
}

impl InMemoryPortfolioRepository {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI32::new(1),
            ..Default::default()
        }
    }

    fn next_id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Linked (title_id, project_id) pairs, for assertions in tests
    pub async fn title_links(&self) -> HashSet<(i32, i32)> {
        self.title_links.read().await.clone()
    }

    /// Linked (tag_id, project_id) pairs, for assertions in tests
    pub async fn tag_links(&self) -> HashSet<(i32, i32)> {
        self.tag_links.read().await.clone()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryPortfolioRepository {
    async fn upsert(&self, user_id: &str, input: UpsertProfile) -> PortfolioResult<Profile> {
        let mut profiles = self.profiles.write().await;

        let profile = match profiles.get(user_id) {
            Some(existing) => Profile {
                id: existing.id,
                user_id: user_id.to_string(),
                name: input.full_name,
                email: input.email.or_else(|| existing.email.clone()),
                headline: input.headline,
                about_text: input.bio,
                location: input.location,
                years_of_experience: input.years_of_experience,
                updated_at: Utc::now(),
            },
            None => Profile {
                id: self.next_id(),
                user_id: user_id.to_string(),
                name: input.full_name,
                email: input.email,
                headline: input.headline,
                about_text: input.bio,
                location: input.location,
                years_of_experience: input.years_of_experience,
                updated_at: Utc::now(),
            },
        };

        profiles.insert(user_id.to_string(), profile.clone());
        tracing::info!(user_id, "Upserted profile");
        Ok(profile)
    }

    async fn get_by_user(&self, user_id: &str) -> PortfolioResult<Option<Profile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(user_id).cloned())
    }
}

#[async_trait]
impl TitleRepository for InMemoryPortfolioRepository {
    async fn create(&self, user_id: &str, input: CreateTitle) -> PortfolioResult<Title> {
        let mut titles = self.titles.write().await;

        let name_exists = titles
            .values()
            .any(|t| t.user_id == user_id && t.title_name == input.name);
        if name_exists {
            return Err(PortfolioError::DuplicateTitle(input.name));
        }

        let title = Title {
            id: self.next_id(),
            user_id: user_id.to_string(),
            title_name: input.name,
            description: input.description,
            priority: input.priority,
        };
        titles.insert(title.id, title.clone());

        tracing::info!(title_id = title.id, "Created title");
        Ok(title)
    }

    async fn list_by_user(&self, user_id: &str) -> PortfolioResult<Vec<Title>> {
        let titles = self.titles.read().await;
        let mut result: Vec<Title> = titles
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by_key(|t| t.id);
        Ok(result)
    }

    async fn get_by_ids(&self, ids: &[i32]) -> PortfolioResult<Vec<Title>> {
        let titles = self.titles.read().await;
        Ok(ids.iter().filter_map(|id| titles.get(id).cloned()).collect())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryPortfolioRepository {
    async fn create(&self, user_id: &str, input: CreateProject) -> PortfolioResult<Project> {
        let mut projects = self.projects.write().await;

        let project = Project {
            id: self.next_id(),
            user_id: user_id.to_string(),
            name: input.name,
            short_description: input.short_description,
            repo_url: input.repo_url,
            status: input.status,
            created_at: Utc::now(),
        };
        projects.insert(project.id, project.clone());

        tracing::info!(project_id = project.id, "Created project");
        Ok(project)
    }

    async fn get_by_id(&self, id: i32) -> PortfolioResult<Option<Project>> {
        let projects = self.projects.read().await;
        Ok(projects.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> PortfolioResult<Vec<Project>> {
        let projects = self.projects.read().await;
        let mut result: Vec<Project> = projects
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by_key(|p| p.id);
        Ok(result)
    }

    async fn attach_titles(&self, project_id: i32, title_ids: &[i32]) -> PortfolioResult<()> {
        let mut links = self.title_links.write().await;
        for title_id in title_ids {
            links.insert((*title_id, project_id));
        }
        Ok(())
    }

    async fn attach_tags(&self, project_id: i32, tag_ids: &[i32]) -> PortfolioResult<()> {
        let mut links = self.tag_links.write().await;
        for tag_id in tag_ids {
            links.insert((*tag_id, project_id));
        }
        Ok(())
    }
}

#[async_trait]
impl TagRepository for InMemoryPortfolioRepository {
    async fn get_or_create(&self, name: &str) -> PortfolioResult<Tag> {
        let mut tags = self.tags.write().await;

        if let Some(existing) = tags.values().find(|t| t.tag_name == name) {
            return Ok(existing.clone());
        }

        let tag = Tag {
            id: self.next_id(),
            tag_name: name.to_string(),
        };
        tags.insert(tag.id, tag.clone());

        tracing::info!(tag_id = tag.id, "Created tag");
        Ok(tag)
    }

    async fn list(&self) -> PortfolioResult<Vec<Tag>> {
        let tags = self.tags.read().await;
        let mut result: Vec<Tag> = tags.values().cloned().collect();
        result.sort_by_key(|t| t.id);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upsert_input(name: &str) -> UpsertProfile {
        UpsertProfile {
            full_name: name.to_string(),
            email: None,
            headline: None,
            bio: None,
            location: None,
            years_of_experience: 2,
        }
    }

    #[tokio::test]
    async fn test_profile_upsert_keeps_id() {
        let repo = InMemoryPortfolioRepository::new();

        let first = repo.upsert("user-1", upsert_input("Ada")).await.unwrap();
        let second = repo.upsert("user-1", upsert_input("Ada L.")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "Ada L.");

        let fetched = ProfileRepository::get_by_user(&repo, "user-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.name, "Ada L.");
    }

    #[tokio::test]
    async fn test_title_unique_per_user() {
        let repo = InMemoryPortfolioRepository::new();

        let input = CreateTitle {
            name: "Backend Engineer".to_string(),
            description: None,
            priority: 1,
        };
        TitleRepository::create(&repo, "user-1", input.clone())
            .await
            .unwrap();

        let duplicate = TitleRepository::create(&repo, "user-1", input.clone()).await;
        assert!(matches!(duplicate, Err(PortfolioError::DuplicateTitle(_))));

        // Same name is fine for another user
        TitleRepository::create(&repo, "user-2", input)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_attach_titles_is_idempotent() {
        let repo = InMemoryPortfolioRepository::new();

        repo.attach_titles(10, &[1, 2]).await.unwrap();
        repo.attach_titles(10, &[2, 3]).await.unwrap();

        let links = repo.title_links().await;
        assert_eq!(links.len(), 3);
        assert!(links.contains(&(2, 10)));
    }

    #[tokio::test]
    async fn test_tag_get_or_create() {
        let repo = InMemoryPortfolioRepository::new();

        let first = repo.get_or_create("rust").await.unwrap();
        let second = repo.get_or_create("rust").await.unwrap();
        assert_eq!(first.id, second.id);

        let other = repo.get_or_create("axum").await.unwrap();
        assert_ne!(first.id, other.id);

        assert_eq!(TagRepository::list(&repo).await.unwrap().len(), 2);
    }
}
