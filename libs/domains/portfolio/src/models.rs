use chrono::{DateTime, Utc};
use domain_embeddings::EmbeddingType;
use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

fn default_priority() -> i32 {
    1
}

/// Project lifecycle status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "archived")]
    Archived,
}

/// A user's portfolio profile. One row per external auth subject.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i32,
    pub user_id: String,
    #[serde(rename = "fullName")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub headline: Option<String>,
    #[serde(rename = "bio")]
    pub about_text: Option<String>,
    pub location: Option<String>,
    pub years_of_experience: i32,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating or updating a profile (upsert by caller identity)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProfile {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 255))]
    pub headline: Option<String>,
    pub bio: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 80))]
    pub years_of_experience: i32,
}

/// A professional title a user presents themselves under
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Title {
    pub id: i32,
    #[serde(skip)]
    pub user_id: String,
    #[serde(rename = "name")]
    pub title_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: i32,
}

/// DTO for creating a title
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTitle {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: i32,
}

/// A portfolio project
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i32,
    #[serde(skip)]
    pub user_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
}

/// One descriptive text attached to a project, queued for embedding
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct DescriptionInput {
    #[serde(rename = "type")]
    pub embedding_type: EmbeddingType,
    #[validate(length(min = 1, max = 10000))]
    pub text: String,
}

/// DTO for creating a project.
///
/// Any descriptions included here are enqueued as pending embedding
/// records alongside the project itself.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 255))]
    pub short_description: Option<String>,
    #[validate(length(max = 255))]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    #[validate(nested)]
    pub descriptions: Vec<DescriptionInput>,
}

/// A reusable tag, shared across users
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Tag {
    pub id: i32,
    #[serde(rename = "name")]
    pub tag_name: String,
}

/// DTO for creating a tag (get-or-create by name)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTag {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
}

/// Request body for linking existing titles to a project
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AttachTitles {
    #[serde(rename = "titleIds")]
    #[validate(length(min = 1))]
    pub title_ids: Vec<i32>,
}

/// Request body for linking tags to a project, creating them as needed
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AttachTags {
    #[validate(length(min = 1))]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_project_defaults() {
        let input: CreateProject =
            serde_json::from_str(r#"{"name": "portfolio-api"}"#).unwrap();
        assert_eq!(input.status, ProjectStatus::Active);
        assert!(input.descriptions.is_empty());
    }

    #[test]
    fn test_description_input_type_field() {
        let input: DescriptionInput =
            serde_json::from_str(r#"{"type": "tech_stack", "text": "rust, axum"}"#).unwrap();
        assert_eq!(input.embedding_type, EmbeddingType::TechStack);
    }

    #[test]
    fn test_profile_response_field_names() {
        let profile = Profile {
            id: 1,
            user_id: "user-1".to_string(),
            name: "Ada".to_string(),
            email: Some("ada@example.com".to_string()),
            headline: None,
            about_text: Some("builds things".to_string()),
            location: None,
            years_of_experience: 3,
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["fullName"], "Ada");
        assert_eq!(json["bio"], "builds things");
        assert_eq!(json["userId"], "user-1");
    }
}
