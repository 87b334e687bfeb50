//! # Axum Helpers
//!
//! Shared utilities for building Axum web applications:
//!
//! - [`errors`]: Structured error responses with stable error codes
//! - [`extractors`]: Custom extractors (validated JSON, bearer identity)
//! - [`health`]: Health/readiness endpoints
//! - [`server`]: Server startup with graceful shutdown

pub mod errors;
pub mod extractors;
pub mod health;
pub mod server;

pub use errors::{AppError, ErrorBody};
pub use extractors::{AuthUser, ValidatedJson};
pub use health::{health_router, HealthResponse};
pub use server::{create_app, shutdown_signal};
