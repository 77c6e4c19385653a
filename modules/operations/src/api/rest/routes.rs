use std::sync::Arc;

use axum::Router;
use axum::extract::Extension;
use axum::routing::{get, post};
use fsm_rest::crud;

use crate::domain::model::{Customer, Employee, InternalOrder, Product, Route, WorkOrder};
use crate::domain::service::OperationsService;

use super::handlers;

/// Image files are fetched by `<img>` tags and carry no token.
pub fn public_router(svc: Arc<OperationsService>) -> Router {
    Router::new()
        .route(
            "/api/uploads/products/{filename}",
            get(handlers::product_image),
        )
        .layer(Extension(svc))
}

/// Routes that expect the auth middleware in front of them.
pub fn protected_router(svc: Arc<OperationsService>) -> Router {
    Router::new()
        .route(
            "/api/customers",
            post(crud::create::<Customer>).get(handlers::list_customers),
        )
        .route("/api/customers/import", post(handlers::import_customers))
        .route(
            "/api/customers/{id}",
            get(crud::get::<Customer>)
                .put(crud::update::<Customer>)
                .delete(crud::delete::<Customer>),
        )
        .route(
            "/api/employees",
            post(crud::create::<Employee>).get(crud::list::<Employee>),
        )
        .route(
            "/api/employees/{id}",
            get(crud::get::<Employee>)
                .put(crud::update::<Employee>)
                .delete(crud::delete::<Employee>),
        )
        .route(
            "/api/workorders",
            post(crud::create::<WorkOrder>).get(handlers::list_work_orders),
        )
        .route(
            "/api/workorders/{id}",
            get(crud::get::<WorkOrder>)
                .put(crud::update::<WorkOrder>)
                .delete(crud::delete::<WorkOrder>),
        )
        .route(
            "/api/internalorders",
            post(crud::create::<InternalOrder>).get(handlers::list_internal_orders),
        )
        .route(
            "/api/internalorders/{id}",
            get(crud::get::<InternalOrder>)
                .put(crud::update::<InternalOrder>)
                .delete(crud::delete::<InternalOrder>),
        )
        .route(
            "/api/products",
            post(crud::create::<Product>).get(handlers::list_products),
        )
        .route(
            "/api/products/{id}",
            get(crud::get::<Product>)
                .put(crud::update::<Product>)
                .delete(crud::delete::<Product>),
        )
        .route(
            "/api/products/{id}/upload-image",
            post(handlers::upload_product_image),
        )
        .route(
            "/api/routes",
            post(handlers::create_route).get(crud::list::<Route>),
        )
        .route("/api/routes/from-anleggsnr", post(handlers::create_route))
        .route(
            "/api/routes/{id}",
            get(crud::get::<Route>)
                .put(handlers::update_route)
                .delete(crud::delete::<Route>),
        )
        .route("/api/dashboard/stats", get(handlers::dashboard))
        .layer(Extension(svc.customers().clone()))
        .layer(Extension(svc.employees().clone()))
        .layer(Extension(svc.work_orders().clone()))
        .layer(Extension(svc.internal_orders().clone()))
        .layer(Extension(svc.products().clone()))
        .layer(Extension(svc.routes().clone()))
        .layer(Extension(svc))
}
