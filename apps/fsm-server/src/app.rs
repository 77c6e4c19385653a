use std::sync::Arc;
use std::time::Duration;

use axum::extract::{DefaultBodyLimit, OriginalUri};
use axum::http::{HeaderName, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use fsm_auth::{AuthState, TokenService, require_auth};
use fsm_db::{Db, DbError, DocumentStore};
use fsm_errors::{catalog, current_trace_id};
use operations::OperationsConfig;
use seed::{SeedService, Targets};
use serde_json::json;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::cors::build_cors_layer;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Apply every schema the server needs.
///
/// # Errors
/// Returns an error if a migration fails.
pub async fn migrate(db: &Db) -> Result<(), DbError> {
    fsm_db::document::migrate(db).await?;
    accounts::migrate(db).await?;
    Ok(())
}

/// Wire all modules over `db` and return the complete HTTP application.
#[must_use]
pub fn build_router(cfg: &AppConfig, db: &Db) -> Router {
    let tokens = Arc::new(TokenService::new(&cfg.auth));
    let accounts_svc =
        accounts::service(db.clone(), tokens.clone(), accounts::ServiceConfig::default());
    let operations_svc = operations::service(
        db.clone(),
        &OperationsConfig {
            uploads_dir: cfg.server.uploads_dir.clone(),
        },
    );
    let hse_svc = hse::service(db.clone());
    let economy_svc = economy::service(db.clone());
    let seed_svc = Arc::new(SeedService::new(
        cfg.seed.secret.clone(),
        Targets {
            accounts: accounts_svc.clone(),
            operations: operations_svc.clone(),
            hse: hse_svc.clone(),
            economy: economy_svc.clone(),
            documents: DocumentStore::new(db.clone()),
        },
    ));

    let auth_state = AuthState::new(
        tokens,
        Arc::new(accounts::AccountsIdentity::new(accounts_svc.clone())),
    );

    let protected = Router::new()
        .merge(accounts::api::rest::routes::protected_router(accounts_svc.clone()))
        .merge(operations::api::rest::routes::protected_router(operations_svc.clone()))
        .merge(hse::api::rest::routes::protected_router(&hse_svc))
        .merge(economy::api::rest::routes::protected_router(economy_svc))
        .route_layer(from_fn_with_state(auth_state, require_auth));

    let public = Router::new()
        .route("/health", get(health))
        .merge(accounts::api::rest::routes::public_router(accounts_svc))
        .merge(operations::api::rest::routes::public_router(operations_svc))
        .merge(seed::api::rest::routes::public_router(seed_svc));

    let x_request_id = HeaderName::from_static("x-request-id");

    public
        .merge(protected)
        .fallback(not_found)
        .layer(build_cors_layer(&cfg.cors))
        .layer(RequestBodyLimitLayer::new(cfg.server.body_limit_bytes))
        .layer(DefaultBodyLimit::max(cfg.server.body_limit_bytes))
        .layer(TimeoutLayer::with_status_code(StatusCode::GATEWAY_TIMEOUT, REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found(OriginalUri(uri): OriginalUri) -> Response {
    catalog::NOT_FOUND
        .with_context("No route matches this path", uri.path(), current_trace_id())
        .into_response()
}
