use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(pk_auto(Tags::Id))
                    .col(
                        ColumnDef::new(Tags::TagName)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Join table linking tags to projects
        manager
            .create_table(
                Table::create()
                    .table(TagProject::Table)
                    .if_not_exists()
                    .col(integer(TagProject::TagId))
                    .col(integer(TagProject::ProjectId))
                    .primary_key(
                        Index::create()
                            .col(TagProject::TagId)
                            .col(TagProject::ProjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tag_project_tag_id")
                            .from(TagProject::Table, TagProject::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tag_project_project_id")
                            .from(TagProject::Table, TagProject::ProjectId)
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
            .drop_table(Table::drop().table(TagProject::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    TagName,
}

#[derive(DeriveIden)]
enum TagProject {
    Table,
    TagId,
    ProjectId,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
}
