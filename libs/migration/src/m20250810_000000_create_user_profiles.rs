use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfiles::Table)
                    .if_not_exists()
                    .col(pk_auto(UserProfiles::Id))
                    .col(
                        // Subject from the external auth service
                        ColumnDef::new(UserProfiles::UserId)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(string_len_null(UserProfiles::Email, 255))
                    .col(string_len(UserProfiles::Name, 255))
                    .col(string_len_null(UserProfiles::Headline, 255))
                    .col(text_null(UserProfiles::AboutText))
                    .col(string_len_null(UserProfiles::Location, 255))
                    .col(integer(UserProfiles::YearsOfExperience).default(0))
                    .col(string_len_null(UserProfiles::ProfilePicture, 255))
                    .col(
                        timestamp_with_time_zone(UserProfiles::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(UserProfiles::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_profiles_user_id")
                    .table(UserProfiles::Table)
                    .col(UserProfiles::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserProfiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserProfiles {
    Table,
    Id,
    UserId,
    Email,
    Name,
    Headline,
    AboutText,
    Location,
    YearsOfExperience,
    ProfilePicture,
    CreatedAt,
    UpdatedAt,
}
