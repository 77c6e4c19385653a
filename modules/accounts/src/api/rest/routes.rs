use std::sync::Arc;

use axum::Router;
use axum::extract::Extension;
use axum::routing::{delete, get, post, put};

use crate::domain::service::AccountsService;

use super::handlers;

/// Routes reachable without a token.
pub fn public_router(svc: Arc<AccountsService>) -> Router {
    Router::new()
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .layer(Extension(svc))
}

/// Routes that expect the auth middleware in front of them.
pub fn protected_router(svc: Arc<AccountsService>) -> Router {
    Router::new()
        .route("/api/auth/me", get(handlers::me))
        .route(
            "/api/organizations/me",
            get(handlers::get_organization).put(handlers::update_organization),
        )
        .route("/api/organizations/users", get(handlers::list_users))
        .route("/api/organizations/users/create", post(handlers::create_user))
        .route("/api/organizations/users/{user_id}/role", put(handlers::change_role))
        .route("/api/organizations/users/{user_id}", delete(handlers::delete_user))
        .layer(Extension(svc))
}
