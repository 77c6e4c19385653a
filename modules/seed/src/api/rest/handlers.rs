use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, OriginalUri, Query};
use fsm_errors::ApiResult;
use serde::Deserialize;

use crate::domain::service::{SeedService, SeedSummary};

use super::error::seed_error_to_problem;

#[derive(Debug, Default, Deserialize)]
pub struct SeedQuery {
    pub secret: Option<String>,
}

pub async fn seed_database(
    Extension(svc): Extension<Arc<SeedService>>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<SeedQuery>,
) -> ApiResult<Json<SeedSummary>> {
    svc.reseed(query.secret.as_deref())
        .await
        .map(Json)
        .map_err(|e| seed_error_to_problem(&e, uri.path()))
}
