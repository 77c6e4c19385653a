use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, OriginalUri, Path, Query};
use fsm_auth::Authz;
use fsm_errors::ApiResult;
use fsm_rest::{MessageDto, parse_id};

use crate::domain::service::AccountsService;

use super::dto::{
    CreateUserRequest, LoginRequest, OrganizationDto, RegisterRequest, RoleQuery, TokenDto,
    UpdateOrganizationRequest, UserDto,
};

pub async fn register(
    Extension(svc): Extension<Arc<AccountsService>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<TokenDto>> {
    let session = svc.register(req.into()).await?;
    Ok(Json(session.into()))
}

pub async fn login(
    Extension(svc): Extension<Arc<AccountsService>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenDto>> {
    let session = svc.login(&req.email, &req.password).await?;
    Ok(Json(session.into()))
}

pub async fn me(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<AccountsService>>,
) -> ApiResult<Json<UserDto>> {
    Ok(Json(svc.me(&ctx).await?.into()))
}

pub async fn get_organization(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<AccountsService>>,
) -> ApiResult<Json<OrganizationDto>> {
    Ok(Json(svc.organization(&ctx).await?.into()))
}

pub async fn update_organization(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<AccountsService>>,
    Json(req): Json<UpdateOrganizationRequest>,
) -> ApiResult<Json<OrganizationDto>> {
    Ok(Json(svc.update_organization(&ctx, req.into()).await?.into()))
}

pub async fn list_users(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<AccountsService>>,
) -> ApiResult<Json<Vec<UserDto>>> {
    let users = svc.list_users(&ctx).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

pub async fn create_user(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<AccountsService>>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<Json<UserDto>> {
    Ok(Json(svc.add_member(&ctx, req.into()).await?.into()))
}

pub async fn change_role(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<AccountsService>>,
    OriginalUri(uri): OriginalUri,
    Path(user_id): Path<String>,
    Query(q): Query<RoleQuery>,
) -> ApiResult<Json<UserDto>> {
    let user_id = parse_id(&user_id, "User", uri.path())?;
    Ok(Json(svc.change_role(&ctx, user_id, &q.role).await?.into()))
}

pub async fn delete_user(
    Authz(ctx): Authz,
    Extension(svc): Extension<Arc<AccountsService>>,
    OriginalUri(uri): OriginalUri,
    Path(user_id): Path<String>,
) -> ApiResult<Json<MessageDto>> {
    let user_id = parse_id(&user_id, "User", uri.path())?;
    svc.remove_user(&ctx, user_id).await?;
    Ok(Json(MessageDto::new("User removed successfully")))
}
