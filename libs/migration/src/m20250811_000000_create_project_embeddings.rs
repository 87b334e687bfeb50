use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("CREATE EXTENSION IF NOT EXISTS vector")
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectEmbeddings::Table)
                    .if_not_exists()
                    .col(pk_auto(ProjectEmbeddings::Id))
                    .col(integer(ProjectEmbeddings::ProjectId))
                    .col(string_len(ProjectEmbeddings::EmbeddingType, 50))
                    .col(text(ProjectEmbeddings::RawText))
                    .col(
                        ColumnDef::new(ProjectEmbeddings::Embedding)
                            .custom(Alias::new("vector(384)"))
                            .null(),
                    )
                    .col(
                        timestamp_with_time_zone(ProjectEmbeddings::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_embeddings_project_id")
                            .from(ProjectEmbeddings::Table, ProjectEmbeddings::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_embeddings_project_id")
                    .table(ProjectEmbeddings::Table)
                    .col(ProjectEmbeddings::ProjectId)
                    .to_owned(),
            )
            .await?;

        // One embedding row per (project, type) pair
        manager
            .create_index(
                Index::create()
                    .name("uq_project_embeddings_project_id_embedding_type")
                    .table(ProjectEmbeddings::Table)
                    .col(ProjectEmbeddings::ProjectId)
                    .col(ProjectEmbeddings::EmbeddingType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectEmbeddings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProjectEmbeddings {
    Table,
    Id,
    ProjectId,
    EmbeddingType,
    RawText,
    Embedding,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
}
