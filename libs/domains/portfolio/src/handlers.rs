use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{AuthUser, ErrorBody, ValidatedJson};
use domain_embeddings::EmbeddingRecord;
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::PortfolioResult;
use crate::models::{
    AttachTags, AttachTitles, CreateProject, CreateTag, CreateTitle, DescriptionInput, Profile,
    Project, Tag, Title, UpsertProfile,
};
use crate::service::PortfolioService;

const TAG: &str = "profile";

/// OpenAPI documentation for the profile API
#[derive(OpenApi)]
#[openapi(
    paths(
        update_profile,
        get_my_profile,
        create_title,
        list_titles,
        create_project,
        list_projects,
        create_tag,
        list_tags,
        attach_titles,
        attach_tags,
        add_description,
        list_descriptions,
    ),
    components(schemas(
        Profile,
        UpsertProfile,
        Title,
        CreateTitle,
        Project,
        CreateProject,
        Tag,
        CreateTag,
        AttachTitles,
        AttachTags,
        DescriptionInput,
        ErrorBody,
    )),
    tags(
        (name = TAG, description = "Portfolio profile endpoints")
    )
)]
pub struct ApiDoc;

/// Create the profile router with all HTTP endpoints
pub fn router(service: PortfolioService) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", put(update_profile))
        .route("/me", get(get_my_profile))
        .route("/titles", post(create_title).get(list_titles))
        .route("/projects", post(create_project).get(list_projects))
        .route("/tags", post(create_tag).get(list_tags))
        .route("/projects/{id}/titles", post(attach_titles))
        .route("/projects/{id}/tags", post(attach_tags))
        .route(
            "/projects/{id}/descriptions",
            post(add_description).get(list_descriptions),
        )
        .with_state(shared_service)
}

/// Create or update the caller's profile
#[utoipa::path(
    put,
    path = "",
    tag = TAG,
    request_body = UpsertProfile,
    responses(
        (status = 200, description = "Profile saved", body = Profile),
        (status = 400, description = "Validation failure", body = ErrorBody),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorBody)
    )
)]
async fn update_profile(
    State(service): State<Arc<PortfolioService>>,
    AuthUser(user_id): AuthUser,
    ValidatedJson(input): ValidatedJson<UpsertProfile>,
) -> PortfolioResult<Json<Profile>> {
    let profile = service.upsert_profile(&user_id, input).await?;
    Ok(Json(profile))
}

/// Fetch the caller's profile
#[utoipa::path(
    get,
    path = "/me",
    tag = TAG,
    responses(
        (status = 200, description = "Profile found", body = Profile),
        (status = 404, description = "No profile yet", body = ErrorBody)
    )
)]
async fn get_my_profile(
    State(service): State<Arc<PortfolioService>>,
    AuthUser(user_id): AuthUser,
) -> PortfolioResult<Json<Profile>> {
    let profile = service.get_profile(&user_id).await?;
    Ok(Json(profile))
}

/// Create a title
#[utoipa::path(
    post,
    path = "/titles",
    tag = TAG,
    request_body = CreateTitle,
    responses(
        (status = 201, description = "Title created", body = Title),
        (status = 409, description = "Title name already in use", body = ErrorBody)
    )
)]
async fn create_title(
    State(service): State<Arc<PortfolioService>>,
    AuthUser(user_id): AuthUser,
    ValidatedJson(input): ValidatedJson<CreateTitle>,
) -> PortfolioResult<impl IntoResponse> {
    let title = service.create_title(&user_id, input).await?;
    Ok((StatusCode::CREATED, Json(title)))
}

/// List the caller's titles
#[utoipa::path(
    get,
    path = "/titles",
    tag = TAG,
    responses(
        (status = 200, description = "List of titles", body = Vec<Title>)
    )
)]
async fn list_titles(
    State(service): State<Arc<PortfolioService>>,
    AuthUser(user_id): AuthUser,
) -> PortfolioResult<Json<Vec<Title>>> {
    let titles = service.list_titles(&user_id).await?;
    Ok(Json(titles))
}

/// Create a project; any included descriptions are queued for embedding
#[utoipa::path(
    post,
    path = "/projects",
    tag = TAG,
    request_body = CreateProject,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 400, description = "Validation failure", body = ErrorBody)
    )
)]
async fn create_project(
    State(service): State<Arc<PortfolioService>>,
    AuthUser(user_id): AuthUser,
    ValidatedJson(input): ValidatedJson<CreateProject>,
) -> PortfolioResult<impl IntoResponse> {
    let project = service.create_project(&user_id, input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// List the caller's projects
#[utoipa::path(
    get,
    path = "/projects",
    tag = TAG,
    responses(
        (status = 200, description = "List of projects", body = Vec<Project>)
    )
)]
async fn list_projects(
    State(service): State<Arc<PortfolioService>>,
    AuthUser(user_id): AuthUser,
) -> PortfolioResult<Json<Vec<Project>>> {
    let projects = service.list_projects(&user_id).await?;
    Ok(Json(projects))
}

/// Create a tag, or return the existing tag of that name
#[utoipa::path(
    post,
    path = "/tags",
    tag = TAG,
    request_body = CreateTag,
    responses(
        (status = 201, description = "Tag created or found", body = Tag)
    )
)]
async fn create_tag(
    State(service): State<Arc<PortfolioService>>,
    AuthUser(_user_id): AuthUser,
    ValidatedJson(input): ValidatedJson<CreateTag>,
) -> PortfolioResult<impl IntoResponse> {
    let tag = service.create_tag(input).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

/// List all tags
#[utoipa::path(
    get,
    path = "/tags",
    tag = TAG,
    responses(
        (status = 200, description = "List of tags", body = Vec<Tag>)
    )
)]
async fn list_tags(
    State(service): State<Arc<PortfolioService>>,
) -> PortfolioResult<Json<Vec<Tag>>> {
    let tags = service.list_tags().await?;
    Ok(Json(tags))
}

/// Link existing titles to a project
#[utoipa::path(
    post,
    path = "/projects/{id}/titles",
    tag = TAG,
    params(("id" = i32, Path, description = "Project ID")),
    request_body = AttachTitles,
    responses(
        (status = 200, description = "Titles attached"),
        (status = 404, description = "Project or title not found", body = ErrorBody)
    )
)]
async fn attach_titles(
    State(service): State<Arc<PortfolioService>>,
    AuthUser(_user_id): AuthUser,
    Path(project_id): Path<i32>,
    ValidatedJson(input): ValidatedJson<AttachTitles>,
) -> PortfolioResult<impl IntoResponse> {
    service.attach_titles(project_id, input).await?;
    Ok(Json(json!({"message": "Titles attached"})))
}

/// Link tags to a project, creating unknown tags on the fly
#[utoipa::path(
    post,
    path = "/projects/{id}/tags",
    tag = TAG,
    params(("id" = i32, Path, description = "Project ID")),
    request_body = AttachTags,
    responses(
        (status = 200, description = "Tags attached"),
        (status = 404, description = "Project not found", body = ErrorBody)
    )
)]
async fn attach_tags(
    State(service): State<Arc<PortfolioService>>,
    AuthUser(_user_id): AuthUser,
    Path(project_id): Path<i32>,
    ValidatedJson(input): ValidatedJson<AttachTags>,
) -> PortfolioResult<impl IntoResponse> {
    service.attach_tags(project_id, input).await?;
    Ok(Json(json!({"message": "Tags attached"})))
}

/// Attach a description text to a project and queue it for embedding
#[utoipa::path(
    post,
    path = "/projects/{id}/descriptions",
    tag = TAG,
    params(("id" = i32, Path, description = "Project ID")),
    request_body = DescriptionInput,
    responses(
        (status = 201, description = "Description queued for embedding", body = EmbeddingRecord),
        (status = 404, description = "Project not found", body = ErrorBody),
        (status = 409, description = "Description of this type already exists", body = ErrorBody)
    )
)]
async fn add_description(
    State(service): State<Arc<PortfolioService>>,
    AuthUser(_user_id): AuthUser,
    Path(project_id): Path<i32>,
    ValidatedJson(input): ValidatedJson<DescriptionInput>,
) -> PortfolioResult<impl IntoResponse> {
    let record = service.add_description(project_id, input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// List a project's descriptions with their embedding state
#[utoipa::path(
    get,
    path = "/projects/{id}/descriptions",
    tag = TAG,
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "List of descriptions", body = Vec<EmbeddingRecord>),
        (status = 404, description = "Project not found", body = ErrorBody)
    )
)]
async fn list_descriptions(
    State(service): State<Arc<PortfolioService>>,
    AuthUser(_user_id): AuthUser,
    Path(project_id): Path<i32>,
) -> PortfolioResult<Json<Vec<EmbeddingRecord>>> {
    let records = service.list_descriptions(project_id).await?;
    Ok(Json(records))
}
