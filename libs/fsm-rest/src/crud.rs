//! Generic handlers for one document collection.
//!
//! ```ignore
//! Router::new()
//!     .route("/api/employees", post(crud::create::<Employee>).get(crud::list::<Employee>))
//!     .route(
//!         "/api/employees/{id}",
//!         get(crud::get::<Employee>).put(crud::update::<Employee>).delete(crud::delete::<Employee>),
//!     )
//!     .layer(Extension(employees))
//! ```
//!
//! Request bodies carry only the entity fields; envelope fields sent by a
//! client are ignored by deserialization.

use axum::Json;
use axum::extract::{Extension, OriginalUri, Path};
use fsm_auth::Authz;
use fsm_db::{Collection, Document, Record};
use fsm_errors::ApiResult;
use crate::{MessageDto, parse_id, repo_error_to_problem};

/// `POST`: store the body in the caller's organization.
///
/// # Errors
/// 500 on storage failures.
pub async fn create<T: Document>(
    Authz(ctx): Authz,
    Extension(col): Extension<Collection<T>>,
    OriginalUri(uri): OriginalUri,
    Json(body): Json<T>,
) -> ApiResult<Json<Record<T>>> {
    col.create(&ctx, body)
        .await
        .map(Json)
        .map_err(|e| repo_error_to_problem(&e, uri.path()))
}

/// `GET`: the caller's records, oldest first.
///
/// # Errors
/// 500 on storage failures.
pub async fn list<T: Document>(
    Authz(ctx): Authz,
    Extension(col): Extension<Collection<T>>,
    OriginalUri(uri): OriginalUri,
) -> ApiResult<Json<Vec<Record<T>>>> {
    col.list(&ctx)
        .await
        .map(Json)
        .map_err(|e| repo_error_to_problem(&e, uri.path()))
}

/// # Errors
/// 404 for unknown or malformed ids, 403 for another organization's record.
pub async fn get<T: Document>(
    Authz(ctx): Authz,
    Extension(col): Extension<Collection<T>>,
    OriginalUri(uri): OriginalUri,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Record<T>>> {
    let id = parse_id(&raw_id, T::LABEL, uri.path())?;
    col.get(&ctx, id)
        .await
        .map(Json)
        .map_err(|e| repo_error_to_problem(&e, uri.path()))
}

/// `PUT`: replace the record's fields, keeping its envelope.
///
/// # Errors
/// 404 for unknown or malformed ids, 403 for another organization's record.
pub async fn update<T: Document>(
    Authz(ctx): Authz,
    Extension(col): Extension<Collection<T>>,
    OriginalUri(uri): OriginalUri,
    Path(raw_id): Path<String>,
    Json(body): Json<T>,
) -> ApiResult<Json<Record<T>>> {
    let id = parse_id(&raw_id, T::LABEL, uri.path())?;
    col.update(&ctx, id, body)
        .await
        .map(Json)
        .map_err(|e| repo_error_to_problem(&e, uri.path()))
}

/// # Errors
/// 404 for unknown or malformed ids, 403 for another organization's record.
pub async fn delete<T: Document>(
    Authz(ctx): Authz,
    Extension(col): Extension<Collection<T>>,
    OriginalUri(uri): OriginalUri,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<MessageDto>> {
    let id = parse_id(&raw_id, T::LABEL, uri.path())?;
    col.delete(&ctx, id)
        .await
        .map_err(|e| repo_error_to_problem(&e, uri.path()))?;
    Ok(Json(MessageDto::new(format!("{} deleted successfully", T::LABEL))))
}
