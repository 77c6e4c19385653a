use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Multipart, OriginalUri, Path, Query};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use fsm_auth::Authz;
use fsm_db::{Document, Record};
use fsm_errors::ApiResult;
use fsm_rest::{parse_id, read_upload};

use crate::domain::dashboard::DashboardStats;
use crate::domain::model::{
    Customer, InternalOrder, InternalOrderFilter, NewRoute, Product, Route, WorkOrder,
    WorkOrderFilter,
};
use crate::domain::service::OperationsService;

use super::dto::{CustomerQuery, ImportResultDto, ProductQuery, UploadImageDto};
use super::error::domain_error_to_problem;

pub async fn list_customers(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<OperationsService>>,
    Query(query): Query<CustomerQuery>,
) -> ApiResult<Json<Vec<Record<Customer>>>> {
    Ok(Json(svc.list_customers(&ctx, query.search.as_deref()).await?))
}

pub async fn import_customers(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<OperationsService>>,
    OriginalUri(uri): OriginalUri,
    multipart: Multipart,
) -> ApiResult<Json<ImportResultDto>> {
    let upload = read_upload(multipart, uri.path()).await?;
    let imported = svc
        .import_customers(&ctx, &upload.filename, upload.bytes.to_vec())
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(ImportResultDto::new(imported)))
}

pub async fn list_work_orders(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<OperationsService>>,
    Query(filter): Query<WorkOrderFilter>,
) -> ApiResult<Json<Vec<Record<WorkOrder>>>> {
    Ok(Json(svc.list_work_orders(&ctx, &filter).await?))
}

pub async fn list_internal_orders(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<OperationsService>>,
    Query(filter): Query<InternalOrderFilter>,
) -> ApiResult<Json<Vec<Record<InternalOrder>>>> {
    Ok(Json(svc.list_internal_orders(&ctx, &filter).await?))
}

pub async fn list_products(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<OperationsService>>,
    Query(query): Query<ProductQuery>,
) -> ApiResult<Json<Vec<Record<Product>>>> {
    Ok(Json(svc.list_products(&ctx, query.kategori.as_deref()).await?))
}

pub async fn upload_product_image(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<OperationsService>>,
    OriginalUri(uri): OriginalUri,
    Path(product_id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Json<UploadImageDto>> {
    let product_id = parse_id(&product_id, Product::LABEL, uri.path())?;
    let upload = read_upload(multipart, uri.path()).await?;
    let image_url = svc
        .upload_product_image(
            &ctx,
            product_id,
            &upload.filename,
            upload.content_type.as_deref(),
            &upload.bytes,
        )
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(UploadImageDto::new(image_url)))
}

pub async fn product_image(
    Extension(svc): Extension<Arc<OperationsService>>,
    OriginalUri(uri): OriginalUri,
    Path(filename): Path<String>,
) -> ApiResult<Response> {
    let (content_type, bytes) = svc
        .product_image(&filename)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(([(header::CONTENT_TYPE, content_type.to_string())], bytes).into_response())
}

pub async fn create_route(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<OperationsService>>,
    Json(req): Json<NewRoute>,
) -> ApiResult<Json<Record<Route>>> {
    Ok(Json(svc.create_route(&ctx, req).await?))
}

pub async fn update_route(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<OperationsService>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
    Json(req): Json<NewRoute>,
) -> ApiResult<Json<Record<Route>>> {
    let id = parse_id(&id, Route::LABEL, uri.path())?;
    svc.update_route(&ctx, id, req)
        .await
        .map(Json)
        .map_err(|e| domain_error_to_problem(&e, uri.path()))
}

pub async fn dashboard(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<OperationsService>>,
) -> ApiResult<Json<DashboardStats>> {
    Ok(Json(svc.dashboard(&ctx).await?))
}
