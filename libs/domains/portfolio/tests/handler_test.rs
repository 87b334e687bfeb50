//! Handler tests for the portfolio profile surface.
//!
//! These run the axum router against the in-memory repositories, so they
//! cover request deserialization, auth extraction, status codes and
//! response shapes without needing a database.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_embeddings::{EmbeddingRepository, InMemoryEmbeddingRepository};
use domain_portfolio::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> (Router, Arc<InMemoryEmbeddingRepository>) {
    let repo = Arc::new(InMemoryPortfolioRepository::new());
    let embeddings = Arc::new(InMemoryEmbeddingRepository::new());
    let service = PortfolioService::new(
        repo.clone(),
        repo.clone(),
        repo.clone(),
        repo,
        embeddings.clone(),
    );
    (handlers::router(service), embeddings)
}

fn request(method: &str, uri: &str, user: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", user))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str, user: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", user))
        .body(Body::empty())
        .unwrap()
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_profile_upsert_then_me() {
    let (app, _) = app();

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            "/",
            "user-1",
            json!({"fullName": "Ada Lovelace", "bio": "writes engines", "yearsOfExperience": 5}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/me", "user-1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["fullName"], "Ada Lovelace");
    assert_eq!(body["bio"], "writes engines");
    assert_eq!(body["userId"], "user-1");
}

#[tokio::test]
async fn test_me_without_profile_is_404() {
    let (app, _) = app();

    let response = app.oneshot(get("/me", "user-1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_bearer_token_is_401() {
    let (app, _) = app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_title_returns_201_and_conflict_on_duplicate() {
    let (app, _) = app();

    let body = json!({"name": "Backend Engineer", "priority": 2});

    let response = app
        .clone()
        .oneshot(request("POST", "/titles", "user-1", body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let title = json_body(response.into_body()).await;
    assert_eq!(title["name"], "Backend Engineer");
    assert_eq!(title["priority"], 2);

    let response = app
        .oneshot(request("POST", "/titles", "user-1", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_titles_are_scoped_to_caller() {
    let (app, _) = app();

    app.clone()
        .oneshot(request(
            "POST",
            "/titles",
            "user-1",
            json!({"name": "Data Engineer"}),
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/titles", "user-2")).await.unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_project_with_descriptions_enqueues_records() {
    let (app, embeddings) = app();

    let response = app
        .oneshot(request(
            "POST",
            "/projects",
            "user-1",
            json!({
                "name": "portfolio-api",
                "shortDescription": "profile CRUD service",
                "descriptions": [
                    {"type": "overview", "text": "an http service for portfolios"},
                    {"type": "tech_stack", "text": "rust, axum, postgres"}
                ]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let project = json_body(response.into_body()).await;
    assert_eq!(project["status"], "active");

    let pending = embeddings.fetch_pending().await.unwrap();
    assert_eq!(pending.len(), 2);
}

#[tokio::test]
async fn test_add_description_conflict_on_second_of_same_type() {
    let (app, _) = app();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/projects",
            "user-1",
            json!({"name": "portfolio-api"}),
        ))
        .await
        .unwrap();
    let project = json_body(response.into_body()).await;
    let uri = format!("/projects/{}/descriptions", project["id"]);

    let body = json!({"type": "overview", "text": "first text"});
    let response = app
        .clone()
        .oneshot(request("POST", &uri, "user-1", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json!({"type": "overview", "text": "second text"});
    let response = app
        .oneshot(request("POST", &uri, "user-1", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_attach_tags_get_or_create_and_idempotent() {
    let (app, _) = app();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/projects",
            "user-1",
            json!({"name": "portfolio-api"}),
        ))
        .await
        .unwrap();
    let project = json_body(response.into_body()).await;
    let uri = format!("/projects/{}/tags", project["id"]);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                &uri,
                "user-1",
                json!({"tags": ["rust", "axum"]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.oneshot(get("/tags", "user-1")).await.unwrap();
    let tags = json_body(response.into_body()).await;
    assert_eq!(tags.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_attach_titles_unknown_project_is_404() {
    let (app, _) = app();

    let response = app
        .oneshot(request(
            "POST",
            "/projects/999/titles",
            "user-1",
            json!({"titleIds": [1]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
