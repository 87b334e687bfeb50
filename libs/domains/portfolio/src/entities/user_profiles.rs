use sea_orm::entity::prelude::*;

use crate::models::Profile;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: String,
    pub email: Option<String>,
    pub name: String,
    pub headline: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub about_text: Option<String>,
    pub location: Option<String>,
    pub years_of_experience: i32,
    pub profile_picture: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Profile {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            email: model.email,
            headline: model.headline,
            about_text: model.about_text,
            location: model.location,
            years_of_experience: model.years_of_experience,
            updated_at: model.updated_at.into(),
        }
    }
}
