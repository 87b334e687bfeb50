//! Postgres repository tests for the portfolio domain.
//!
//! These run against a pgvector container and are ignored by default;
//! run them with `cargo test -- --ignored` when Docker is available.

use domain_portfolio::{
    CreateProject, CreateTitle, PgPortfolioRepository, PortfolioError, ProfileRepository,
    ProjectRepository, ProjectStatus, TagRepository, TitleRepository, UpsertProfile,
};
use test_utils::{TestDataBuilder, TestDatabase};

fn upsert_input(name: &str) -> UpsertProfile {
    UpsertProfile {
        full_name: name.to_string(),
        email: None,
        headline: Some("Engineer".to_string()),
        bio: None,
        location: None,
        years_of_experience: 3,
    }
}

fn project_input(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        short_description: None,
        repo_url: None,
        status: ProjectStatus::Active,
        descriptions: vec![],
    }
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_profile_upsert_keeps_id() {
    let db = TestDatabase::new().await;
    let repo = PgPortfolioRepository::new(db.connection());
    let user_id = TestDataBuilder::from_test_name("pg_profile_upsert").user_id();

    let first = repo.upsert(&user_id, upsert_input("Ada")).await.unwrap();
    let mut update = upsert_input("Ada L.");
    update.email = Some("ada@example.com".to_string());
    let second = repo.upsert(&user_id, update).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.name, "Ada L.");
    assert_eq!(second.email.as_deref(), Some("ada@example.com"));

    // Email survives an update that omits it
    let third = repo.upsert(&user_id, upsert_input("Ada L.")).await.unwrap();
    assert_eq!(third.email.as_deref(), Some("ada@example.com"));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_title_unique_per_user() {
    let db = TestDatabase::new().await;
    let repo = PgPortfolioRepository::new(db.connection());
    let user_id = TestDataBuilder::from_test_name("pg_title_unique").user_id();

    let input = CreateTitle {
        name: "Backend Engineer".to_string(),
        description: None,
        priority: 1,
    };
    TitleRepository::create(&repo, &user_id, input.clone())
        .await
        .unwrap();

    let duplicate = TitleRepository::create(&repo, &user_id, input.clone()).await;
    assert!(matches!(duplicate, Err(PortfolioError::DuplicateTitle(_))));

    // Same name is fine for another user
    TitleRepository::create(&repo, "other-user", input)
        .await
        .unwrap();
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_attach_titles_is_idempotent() {
    let db = TestDatabase::new().await;
    let repo = PgPortfolioRepository::new(db.connection());
    let user_id = TestDataBuilder::from_test_name("pg_attach_titles").user_id();

    let project = ProjectRepository::create(&repo, &user_id, project_input("search-service"))
        .await
        .unwrap();
    let first = TitleRepository::create(
        &repo,
        &user_id,
        CreateTitle {
            name: "Rust Developer".to_string(),
            description: None,
            priority: 1,
        },
    )
    .await
    .unwrap();
    let second = TitleRepository::create(
        &repo,
        &user_id,
        CreateTitle {
            name: "Data Engineer".to_string(),
            description: None,
            priority: 2,
        },
    )
    .await
    .unwrap();

    repo.attach_titles(project.id, &[first.id]).await.unwrap();
    // Re-attaching an existing pair hits ON CONFLICT DO NOTHING
    repo.attach_titles(project.id, &[first.id, second.id])
        .await
        .unwrap();
    repo.attach_titles(project.id, &[]).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_tag_get_or_create() {
    let db = TestDatabase::new().await;
    let repo = PgPortfolioRepository::new(db.connection());

    let first = repo.get_or_create("rust").await.unwrap();
    let second = repo.get_or_create("rust").await.unwrap();
    assert_eq!(first.id, second.id);

    let other = repo.get_or_create("axum").await.unwrap();
    assert_ne!(first.id, other.id);

    let all = TagRepository::list(&repo).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_projects_scoped_by_user() {
    let db = TestDatabase::new().await;
    let repo = PgPortfolioRepository::new(db.connection());
    let user_id = TestDataBuilder::from_test_name("pg_project_scope").user_id();

    ProjectRepository::create(&repo, &user_id, project_input("one"))
        .await
        .unwrap();
    ProjectRepository::create(&repo, &user_id, project_input("two"))
        .await
        .unwrap();
    ProjectRepository::create(&repo, "someone-else", project_input("three"))
        .await
        .unwrap();

    let mine = ProjectRepository::list_by_user(&repo, &user_id).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|p| p.user_id == user_id));
}
