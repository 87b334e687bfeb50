use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Titles::Table)
                    .if_not_exists()
                    .col(pk_auto(Titles::Id))
                    .col(string_len(Titles::UserId, 255))
                    .col(string_len(Titles::TitleName, 255))
                    .col(text_null(Titles::Description))
                    .col(integer(Titles::Priority).default(0))
                    .col(
                        timestamp_with_time_zone(Titles::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_titles_user_id")
                    .table(Titles::Table)
                    .col(Titles::UserId)
                    .to_owned(),
            )
            .await?;

        // One title name per user
        manager
            .create_index(
                Index::create()
                    .name("uq_titles_user_id_title_name")
                    .table(Titles::Table)
                    .col(Titles::UserId)
                    .col(Titles::TitleName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Titles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Titles {
    Table,
    Id,
    UserId,
    TitleName,
    Description,
    Priority,
    CreatedAt,
}
