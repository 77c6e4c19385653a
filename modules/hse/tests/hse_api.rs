#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::Router;
use axum::body::Body;
use axum::extract::Extension;
use axum::http::{Request, StatusCode, header};
use fsm_security::{Role, SecurityContext};
use hse::api::rest::routes::protected_router;
use serde_json::{Value, json};
use tower::ServiceExt as _;
use uuid::Uuid;

async fn apps() -> (Router, Router) {
    let db = fsm_db::connect_in_memory().await.unwrap();
    let svc = hse::service(db);
    let router = protected_router(&svc);
    let mine = SecurityContext::new(Uuid::new_v4(), Uuid::new_v4(), Role::User);
    let theirs = SecurityContext::new(Uuid::new_v4(), Uuid::new_v4(), Role::Admin);
    (
        router.clone().layer(Extension(mine)),
        router.layer(Extension(theirs)),
    )
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
async fn incident_lifecycle() {
    let (app, _) = apps().await;
    let (status, created) = call(
        &app,
        "POST",
        "/api/hms/incidents",
        Some(json!({"dato": "2025-05-05", "beskrivelse": "Kuttskade", "type": "nestenulykke"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{created}");
    assert_eq!(created["type"], "nestenulykke");
    assert_eq!(created["status"], "\u{e5}pen");

    let uri = format!("/api/hms/incidents/{}", created["id"].as_str().unwrap());
    let (status, updated) = call(
        &app,
        "PUT",
        &uri,
        Some(json!({"dato": "2025-05-05", "beskrivelse": "Kuttskade", "status": "lukket"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "lukket");
    assert_eq!(updated["type"], "ulykke");

    let (status, body) = call(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Incident deleted successfully");
}

#[tokio::test]
async fn every_register_is_mounted_and_scoped() {
    let (mine, theirs) = apps().await;
    let bodies = [
        ("/api/hms/riskassessments", json!({"tittel": "Kum", "beskrivelse": "Gass", "dato": "2025-01-01"})),
        ("/api/hms/training", json!({"navn": "Kurs", "beskrivelse": "", "dato": "2025-01-01"})),
        ("/api/hms/equipment", json!({"navn": "Detektor", "control_date": "2025-01-01", "next_control": "2026-01-01"})),
    ];
    for (base, body) in bodies {
        let (status, created) = call(&mine, "POST", base, Some(body)).await;
        assert_eq!(status, StatusCode::OK, "{base}: {created}");

        let (_, listed) = call(&theirs, "GET", base, None).await;
        assert_eq!(listed, json!([]), "{base}");

        let uri = format!("{base}/{}", created["id"].as_str().unwrap());
        let (status, _) = call(&theirs, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{base}");
        let (status, _) = call(&mine, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK, "{base}");
    }
}
