use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Multipart, OriginalUri, Path};
use fsm_auth::Authz;
use fsm_db::{Document, Record};
use fsm_errors::ApiResult;
use fsm_rest::{parse_id, read_upload};

use crate::domain::model::SupplierPricing;
use crate::domain::service::{EconomyService, ServicePricing};

use super::dto::ImportResultDto;
use super::error::domain_error_to_problem;

pub async fn import_services(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<EconomyService>>,
    OriginalUri(uri): OriginalUri,
    multipart: Multipart,
) -> ApiResult<Json<ImportResultDto>> {
    let upload = read_upload(multipart, uri.path()).await?;
    let imported = svc
        .import_services(&ctx, &upload.filename, upload.bytes.to_vec())
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(ImportResultDto::new(imported)))
}

pub async fn create_supplier_pricing(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<EconomyService>>,
    Json(body): Json<SupplierPricing>,
) -> ApiResult<Json<Record<SupplierPricing>>> {
    Ok(Json(svc.create_supplier_pricing(&ctx, body).await?))
}

pub async fn update_supplier_pricing(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<EconomyService>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
    Json(body): Json<SupplierPricing>,
) -> ApiResult<Json<Record<SupplierPricing>>> {
    let id = parse_id(&id, SupplierPricing::LABEL, uri.path())?;
    svc.update_supplier_pricing(&ctx, id, body)
        .await
        .map(Json)
        .map_err(|e| domain_error_to_problem(&e, uri.path()))
}

pub async fn service_pricing(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<EconomyService>>,
    OriginalUri(uri): OriginalUri,
    Path(anleggsnr): Path<String>,
) -> ApiResult<Json<ServicePricing>> {
    svc.service_pricing(&ctx, &anleggsnr)
        .await
        .map(Json)
        .map_err(|e| domain_error_to_problem(&e, uri.path()))
}
