use std::sync::Arc;

use axum::Router;
use axum::extract::Extension;
use axum::routing::get;

use crate::domain::service::SeedService;

use super::handlers;

/// Guarded by the shared secret, not by a token.
pub fn public_router(svc: Arc<SeedService>) -> Router {
    Router::new()
        .route("/api/seed-database", get(handlers::seed_database))
        .layer(Extension(svc))
}
