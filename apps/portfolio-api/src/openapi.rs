//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the portfolio API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio API",
        version = "0.1.0",
        description = "Portfolio profiles, titles, projects and tags"
    ),
    nest(
        (path = "/api/v1/profile", api = domain_portfolio::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
