pub use sea_orm_migration::prelude::*;

mod m20250810_000000_create_user_profiles;
mod m20250810_000001_create_titles;
mod m20250810_000002_create_projects;
mod m20250810_000003_create_tags;
mod m20250811_000000_create_project_embeddings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250810_000000_create_user_profiles::Migration),
            Box::new(m20250810_000001_create_titles::Migration),
            Box::new(m20250810_000002_create_projects::Migration),
            Box::new(m20250810_000003_create_tags::Migration),
            Box::new(m20250811_000000_create_project_embeddings::Migration),
        ]
    }
}
