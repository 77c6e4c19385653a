#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use accounts::api::rest::routes::{protected_router, public_router};
use accounts::{AccountsIdentity, AccountsService, ServiceConfig};
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::{Router, middleware};
use fsm_auth::{AuthConfig, AuthState, TokenService, require_auth};
use serde_json::{Value, json};
use tower::ServiceExt as _;

async fn app() -> Router {
    let db = fsm_db::connect_in_memory().await.unwrap();
    accounts::migrate(&db).await.unwrap();
    let tokens = Arc::new(TokenService::new(&AuthConfig::default()));
    let svc: Arc<AccountsService> = accounts::service(db, tokens.clone(), ServiceConfig::default());
    let auth = AuthState::new(tokens, Arc::new(AccountsIdentity::new(svc.clone())));

    public_router(svc.clone()).merge(
        protected_router(svc).route_layer(middleware::from_fn_with_state(auth, require_auth)),
    )
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(b) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn register(app: &Router, body: Value) -> Value {
    let (status, json) = call(app, "POST", "/api/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    json
}

#[tokio::test]
async fn register_login_and_me() {
    let app = app().await;
    let reg = register(
        &app,
        json!({"email": "a@acme.no", "password": "pw", "name": "Anne", "organization_name": "Acme"}),
    )
    .await;
    assert_eq!(reg["token_type"], "bearer");
    assert_eq!(reg["user"]["role"], "admin");
    assert_eq!(reg["organization"]["name"], "Acme");
    assert_eq!(reg["organization"]["subscription_tier"], "trial");
    assert!(reg["user"].get("password_hash").is_none());

    let (status, login) = call(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "a@acme.no", "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = login["access_token"].as_str().unwrap();

    let (status, me) = call(&app, "GET", "/api/auth/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "a@acme.no");
    assert_eq!(me["organization_id"], reg["organization"]["id"]);
}

#[tokio::test]
async fn bad_login_and_missing_token_are_unauthorized() {
    let app = app().await;
    register(&app, json!({"email": "a@acme.no", "password": "pw", "name": "Anne"})).await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "a@acme.no", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Incorrect email or password");

    let (status, _) = call(&app, "GET", "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = call(&app, "GET", "/api/auth/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_email_is_bad_request() {
    let app = app().await;
    let body = json!({"email": "a@acme.no", "password": "pw", "name": "Anne"});
    register(&app, body.clone()).await;
    let (status, json) = call(&app, "POST", "/api/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["detail"], "Email already registered");
}

#[tokio::test]
async fn join_existing_organization() {
    let app = app().await;
    let a = register(
        &app,
        json!({"email": "a@acme.no", "password": "pw", "name": "Anne", "organization_name": "Acme"}),
    )
    .await;
    let b = register(
        &app,
        json!({"email": "b@acme.no", "password": "pw", "name": "Bjorn", "organization_id": a["organization"]["id"]}),
    )
    .await;
    assert_eq!(b["user"]["role"], "user");
    assert_eq!(b["organization"]["id"], a["organization"]["id"]);

    let (status, _) = call(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"email": "c@acme.no", "password": "pw", "name": "C", "organization_id": uuid::Uuid::new_v4()})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn organization_admin_flow() {
    let app = app().await;
    let a = register(
        &app,
        json!({"email": "a@acme.no", "password": "pw", "name": "Anne", "organization_name": "Acme"}),
    )
    .await;
    let admin = a["access_token"].as_str().unwrap();

    let (status, created) = call(
        &app,
        "POST",
        "/api/organizations/users/create",
        Some(admin),
        Some(json!({"email": "m@acme.no", "password": "pw", "name": "Mia", "role": "user"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{created}");
    let member_id = created["id"].as_str().unwrap().to_owned();

    let (_, users) = call(&app, "GET", "/api/organizations/users", Some(admin), None).await;
    assert_eq!(users.as_array().unwrap().len(), 2);

    let (status, updated) = call(
        &app,
        "PUT",
        &format!("/api/organizations/users/{member_id}/role?role=free"),
        Some(admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["role"], "free");

    let (status, body) = call(
        &app,
        "PUT",
        &format!("/api/organizations/users/{member_id}/role?role=boss"),
        Some(admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let self_id = a["user"]["id"].as_str().unwrap();
    let (status, _) = call(
        &app,
        "DELETE",
        &format!("/api/organizations/users/{self_id}"),
        Some(admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(
        &app,
        "DELETE",
        &format!("/api/organizations/users/{member_id}"),
        Some(admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User removed successfully");

    let (status, org) = call(
        &app,
        "PUT",
        "/api/organizations/me",
        Some(admin),
        Some(json!({"name": "Acme AS", "settings": {"currency": "NOK"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(org["name"], "Acme AS");

    let (_, org) = call(&app, "GET", "/api/organizations/me", Some(admin), None).await;
    assert_eq!(org["settings"]["currency"], "NOK");
}

#[tokio::test]
async fn non_admin_cannot_manage_users_or_foreign_members() {
    let app = app().await;
    let a = register(
        &app,
        json!({"email": "a@acme.no", "password": "pw", "name": "Anne", "organization_name": "Acme"}),
    )
    .await;
    let b = register(
        &app,
        json!({"email": "b@acme.no", "password": "pw", "name": "Bjorn", "organization_id": a["organization"]["id"]}),
    )
    .await;
    let c = register(
        &app,
        json!({"email": "c@other.no", "password": "pw", "name": "Cato", "organization_name": "Other"}),
    )
    .await;

    let member = b["access_token"].as_str().unwrap();
    let (status, _) = call(&app, "GET", "/api/organizations/users", Some(member), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = call(
        &app,
        "PUT",
        "/api/organizations/me",
        Some(member),
        Some(json!({"name": "Hijacked"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let other_admin = c["access_token"].as_str().unwrap();
    let b_id = b["user"]["id"].as_str().unwrap();
    let (status, _) = call(
        &app,
        "DELETE",
        &format!("/api/organizations/users/{b_id}"),
        Some(other_admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn malformed_user_id_is_not_found() {
    let app = app().await;
    let a = register(
        &app,
        json!({"email": "a@acme.no", "password": "pw", "name": "Anne", "organization_name": "Acme"}),
    )
    .await;
    let admin = a["access_token"].as_str().unwrap();

    let (status, body) =
        call(&app, "DELETE", "/api/organizations/users/42", Some(admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
    assert_eq!(body["instance"], "/api/organizations/users/42");

    let (status, body) = call(
        &app,
        "PUT",
        "/api/organizations/users/42/role?role=user",
        Some(admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
}
