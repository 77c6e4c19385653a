use axum::Router;
use axum::extract::Extension;
use axum::routing::{get, post};
use fsm_db::Document;
use fsm_rest::crud;

use crate::domain::model::{Equipment, Incident, RiskAssessment, Training};
use crate::domain::service::HseService;

fn crud_routes<T: Document>(router: Router, base: &str) -> Router {
    router
        .route(base, post(crud::create::<T>).get(crud::list::<T>))
        .route(
            &format!("{base}/{{id}}"),
            get(crud::get::<T>)
                .put(crud::update::<T>)
                .delete(crud::delete::<T>),
        )
}

/// Routes that expect the auth middleware in front of them.
pub fn protected_router(svc: &HseService) -> Router {
    let router = Router::new();
    let router = crud_routes::<RiskAssessment>(router, "/api/hms/riskassessments");
    let router = crud_routes::<Incident>(router, "/api/hms/incidents");
    let router = crud_routes::<Training>(router, "/api/hms/training");
    let router = crud_routes::<Equipment>(router, "/api/hms/equipment");
    router
        .layer(Extension(svc.risk_assessments().clone()))
        .layer(Extension(svc.incidents().clone()))
        .layer(Extension(svc.training().clone()))
        .layer(Extension(svc.equipment().clone()))
}
