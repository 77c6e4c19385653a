use std::sync::Arc;

use axum::Router;
use axum::extract::Extension;
use axum::routing::{get, post};
use fsm_rest::crud;

use crate::domain::model::{Payout, Service, SupplierPricing};
use crate::domain::service::EconomyService;

use super::handlers;

/// Routes that expect the auth middleware in front of them.
///
/// The pricing lookup path shares its `{id}` segment name with the customer
/// routes of the operations module so both can live in one router.
pub fn protected_router(svc: Arc<EconomyService>) -> Router {
    Router::new()
        .route(
            "/api/economy/payouts",
            post(crud::create::<Payout>).get(crud::list::<Payout>),
        )
        .route(
            "/api/economy/payouts/{id}",
            get(crud::get::<Payout>)
                .put(crud::update::<Payout>)
                .delete(crud::delete::<Payout>),
        )
        .route(
            "/api/economy/services",
            post(crud::create::<Service>).get(crud::list::<Service>),
        )
        .route("/api/economy/services/import", post(handlers::import_services))
        .route(
            "/api/economy/services/{id}",
            get(crud::get::<Service>)
                .put(crud::update::<Service>)
                .delete(crud::delete::<Service>),
        )
        .route(
            "/api/economy/supplier-pricing",
            post(handlers::create_supplier_pricing).get(crud::list::<SupplierPricing>),
        )
        .route(
            "/api/economy/supplier-pricing/{id}",
            get(crud::get::<SupplierPricing>)
                .put(handlers::update_supplier_pricing)
                .delete(crud::delete::<SupplierPricing>),
        )
        .route(
            "/api/customers/{id}/service-pricing",
            get(handlers::service_pricing),
        )
        .layer(Extension(svc.payouts().clone()))
        .layer(Extension(svc.services().clone()))
        .layer(Extension(svc.supplier_pricing().clone()))
        .layer(Extension(svc))
}
