//! Portfolio API
//!
//! REST surface for portfolio profiles under `/api/v1/profile`. Project
//! description texts created here are queued as pending embedding records
//! for the embedding worker.

use std::sync::Arc;

use axum::Router;
use axum_helpers::{create_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_embeddings::PgEmbeddingRepository;
use domain_portfolio::{PgPortfolioRepository, PortfolioService, handlers};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to database...");
    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("Database connection failed: {}", e))?;

    database::postgres::run_migrations::<migration::Migrator>(&db, "portfolio-api")
        .await
        .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;

    let portfolio_repo = Arc::new(PgPortfolioRepository::new(db.clone()));
    let embedding_repo = Arc::new(PgEmbeddingRepository::new(db));
    let service = PortfolioService::new(
        portfolio_repo.clone(),
        portfolio_repo.clone(),
        portfolio_repo.clone(),
        portfolio_repo,
        embedding_repo,
    );

    let app = Router::new()
        .nest("/api/v1/profile", handlers::router(service))
        .merge(health_router())
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        );

    info!(port = config.server.port, "Starting portfolio API");
    create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Portfolio API shutdown complete");
    Ok(())
}
