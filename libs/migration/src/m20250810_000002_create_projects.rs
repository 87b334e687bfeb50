use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(pk_auto(Projects::Id))
                    .col(string_len(Projects::UserId, 255))
                    .col(string_len(Projects::Name, 255))
                    .col(string_len_null(Projects::ShortDescription, 255))
                    .col(string_len_null(Projects::RepoUrl, 255))
                    .col(string_len(Projects::Status, 50).default("active"))
                    .col(
                        timestamp_with_time_zone(Projects::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Projects::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_user_id")
                    .table(Projects::Table)
                    .col(Projects::UserId)
                    .to_owned(),
            )
            .await?;

        // Join table linking titles to projects
        manager
            .create_table(
                Table::create()
                    .table(TitleProject::Table)
                    .if_not_exists()
                    .col(integer(TitleProject::TitleId))
                    .col(integer(TitleProject::ProjectId))
                    .primary_key(
                        Index::create()
                            .col(TitleProject::TitleId)
                            .col(TitleProject::ProjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_title_project_title_id")
                            .from(TitleProject::Table, TitleProject::TitleId)
                            .to(Titles::Table, Titles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_title_project_project_id")
                            .from(TitleProject::Table, TitleProject::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TitleProject::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    UserId,
    Name,
    ShortDescription,
    RepoUrl,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TitleProject {
    Table,
    TitleId,
    ProjectId,
}

#[derive(DeriveIden)]
enum Titles {
    Table,
    Id,
}
