#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end flows through the fully wired application: real auth
//! middleware, every module mounted, shared in-memory database.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use fsm_db::{Db, DatabaseConfig};
use fsm_server::{AppConfig, build_router, migrate};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt as _;

struct Harness {
    app: Router,
    _uploads: TempDir,
}

async fn harness() -> Harness {
    let uploads = tempfile::tempdir().unwrap();
    let mut cfg = AppConfig::default();
    cfg.database = DatabaseConfig::in_memory();
    cfg.server.uploads_dir = uploads.path().to_path_buf();
    cfg.seed.secret = Some("let-me-seed".to_owned());

    let db = Db::connect(&cfg.database).await.unwrap();
    migrate(&db).await.unwrap();
    Harness {
        app: build_router(&cfg, &db),
        _uploads: uploads,
    }
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
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn register(app: &Router, email: &str, org: &str) -> String {
    let (status, session) = call(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"email": email, "password": "pw", "name": "Tester", "organization_name": org})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{session}");
    session["access_token"].as_str().unwrap().to_owned()
}

fn customer(anleggsnr: &str, postnr: &str) -> Value {
    json!({
        "anleggsnr": anleggsnr,
        "kundennr": "K1",
        "kundnavn": "Kunde",
        "kommune": "Oslo",
        "adresse": "Veien 1",
        "postnr": postnr,
        "poststed": "Oslo",
    })
}

#[tokio::test]
async fn health_is_public() {
    let h = harness().await;
    let (status, body) = call(&h.app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let h = harness().await;
    for uri in [
        "/api/customers",
        "/api/hms/incidents",
        "/api/economy/payouts",
        "/api/dashboard/stats",
    ] {
        let (status, _) = call(&h.app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
    }
    let (status, _) = call(&h.app, "GET", "/api/customers", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_route_is_a_problem_404() {
    let h = harness().await;
    let (status, body) = call(&h.app, "GET", "/api/nothing-here", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn tenants_only_see_their_own_records() {
    let h = harness().await;
    let alice = register(&h.app, "alice@acme.no", "Acme").await;
    let bob = register(&h.app, "bob@other.no", "Other").await;

    let (status, created) =
        call(&h.app, "POST", "/api/customers", Some(&alice), Some(customer("A-1", "0150"))).await;
    assert_eq!(status, StatusCode::OK, "{created}");
    let id = created["id"].as_str().unwrap();

    let (status, route) = call(
        &h.app,
        "POST",
        "/api/routes",
        Some(&alice),
        Some(json!({"date": "2025-05-01", "anleggsnr_list": ["A-1"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{route}");
    assert_eq!(route["anleggsnr_list"], json!(["A-1"]));

    let (_, own) = call(&h.app, "GET", "/api/customers", Some(&alice), None).await;
    assert_eq!(own.as_array().unwrap().len(), 1);
    let (_, foreign) = call(&h.app, "GET", "/api/customers", Some(&bob), None).await;
    assert_eq!(foreign, json!([]));

    let uri = format!("/api/customers/{id}");
    let (status, body) = call(&h.app, "GET", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Access denied");
    let (status, _) = call(&h.app, "DELETE", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, msg) = call(&h.app, "DELETE", &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(msg["message"], "Customer deleted successfully");
}

#[tokio::test]
async fn register_join_and_share_records() {
    let h = harness().await;
    let register_as = |body: Value| {
        let app = h.app.clone();
        async move {
            let (status, session) =
                call(&app, "POST", "/api/auth/register", None, Some(body)).await;
            assert_eq!(status, StatusCode::OK, "{session}");
            session
        }
    };

    let a = register_as(json!({
        "email": "a@acme.no", "password": "pw", "name": "Anne", "organization_name": "Acme"
    }))
    .await;
    assert_eq!(a["user"]["role"], "admin");
    let acme = a["organization"]["id"].clone();

    let b = register_as(json!({
        "email": "b@acme.no", "password": "pw", "name": "Bjorn", "organization_id": acme
    }))
    .await;
    assert_eq!(b["user"]["role"], "user");
    assert_eq!(b["user"]["organization_id"], acme);

    let c = register_as(json!({
        "email": "c@other.no", "password": "pw", "name": "Cato", "organization_name": "Other"
    }))
    .await;
    assert_ne!(c["organization"]["id"], acme);

    let b_token = b["access_token"].as_str().unwrap();
    let (status, created) =
        call(&h.app, "POST", "/api/customers", Some(b_token), Some(customer("J-1", "0150"))).await;
    assert_eq!(status, StatusCode::OK, "{created}");
    assert_eq!(created["organization_id"], acme);
    let uri = format!("/api/customers/{}", created["id"].as_str().unwrap());

    let (status, seen) = call(&h.app, "GET", &uri, a["access_token"].as_str(), None).await;
    assert_eq!(status, StatusCode::OK, "{seen}");
    assert_eq!(seen["anleggsnr"], "J-1");

    let (status, body) = call(&h.app, "GET", &uri, c["access_token"].as_str(), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Access denied");
}

#[tokio::test]
async fn service_pricing_across_modules() {
    let h = harness().await;
    let token = register(&h.app, "eva@acme.no", "Acme").await;

    let mut site = customer("S-1", "0150");
    site["typenr"] = json!("T9");
    let (status, _) = call(&h.app, "POST", "/api/customers", Some(&token), Some(site)).await;
    assert_eq!(status, StatusCode::OK);
    call(
        &h.app,
        "POST",
        "/api/economy/services",
        Some(&token),
        Some(json!({"tjenestenr": "T9", "tjeneste_navn": "T\u{f8}mming"})),
    )
    .await;

    let (status, pricing) =
        call(&h.app, "GET", "/api/customers/S-1/service-pricing", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK, "{pricing}");
    assert_eq!(pricing["message"], "Service pricing found");
    assert_eq!(pricing["service"]["tjenestenr"], "T9");
}

#[tokio::test]
async fn seed_then_login_with_demo_credentials() {
    let h = harness().await;
    let (status, _) = call(&h.app, "GET", "/api/seed-database?secret=wrong", None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, summary) =
        call(&h.app, "GET", "/api/seed-database?secret=let-me-seed", None, None).await;
    assert_eq!(status, StatusCode::OK, "{summary}");
    assert_eq!(summary["message"], "Database seeded successfully");

    let (status, session) = call(
        &h.app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "admin@biovac.no", "password": "admin123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{session}");
    let token = session["access_token"].as_str().unwrap();

    let (status, stats) = call(&h.app, "GET", "/api/dashboard/stats", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_workorders"], 50);
    assert_eq!(stats["total_customers"], 30);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let h = harness().await;
    let resp = h
        .app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(resp.headers().contains_key("x-request-id"));
}
