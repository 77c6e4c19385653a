#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use fsm_auth::{AuthConfig, TokenService};
use fsm_db::DocumentStore;
use operations::OperationsConfig;
use seed::{SeedService, Targets};
use serde_json::{Value, json};
use tower::ServiceExt as _;

async fn app(secret: Option<&str>) -> Router {
    let db = fsm_db::connect_in_memory().await.unwrap();
    accounts::migrate(&db).await.unwrap();
    let tokens = Arc::new(TokenService::new(&AuthConfig::default()));
    let accounts = accounts::service(db.clone(), tokens, accounts::ServiceConfig::default());
    let targets = Targets {
        accounts: accounts.clone(),
        operations: operations::service(db.clone(), &OperationsConfig::default()),
        hse: hse::service(db.clone()),
        economy: economy::service(db.clone()),
        documents: DocumentStore::new(db),
    };
    let svc = Arc::new(SeedService::new(secret.map(str::to_owned), targets));
    seed::api::rest::routes::public_router(svc)
        .merge(accounts::api::rest::routes::public_router(accounts))
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn rejects_wrong_or_missing_secret() {
    let app = app(Some("s3cret")).await;
    for uri in ["/api/seed-database", "/api/seed-database?secret=nope"] {
        let (status, body) = call(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(body["detail"], "Invalid seed secret");
    }
}

#[tokio::test]
async fn unset_secret_disables_seeding() {
    let app = app(None).await;
    let (status, _) = call(&app, "GET", "/api/seed-database?secret=", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn seeds_two_organizations_and_can_run_twice() {
    let app = app(Some("s3cret")).await;
    for _ in 0..2 {
        let (status, summary) = call(&app, "GET", "/api/seed-database?secret=s3cret", None).await;
        assert_eq!(status, StatusCode::OK, "{summary}");
        let orgs = summary["organizations"].as_array().unwrap();
        assert_eq!(orgs.len(), 2);
        assert_eq!(orgs[0]["name"], "Biovac Norge AS");
        assert_eq!(orgs[1]["name"], "Demo Service AS");
        assert_eq!(orgs[0]["counts"]["users"], 2);
        assert_eq!(orgs[0]["counts"]["customers"], 30);
        assert_eq!(orgs[0]["counts"]["services"], 3);
        assert_eq!(summary["credentials"].as_array().unwrap().len(), 3);
    }

    let (status, session) = call(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "admin@biovac.no", "password": "admin123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["user"]["role"], "admin");
    assert_eq!(session["organization"]["name"], "Biovac Norge AS");

    let (status, session) = call(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"email": "test@test.com", "password": "test"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["organization"]["name"], "Demo Service AS");
}
