//! Store API library
//!
//! Persistence layer and REST surface for customers, suppliers, products,
//! orders, contacts and their join records.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod ids;
pub mod middleware_helpers;
pub mod migrator;
pub mod repositories;
pub mod services;
pub mod tracing;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

use crate::entities::{contact, order_product_supplier, product_supplier};
use crate::handlers::records::record_routes;

// App state definition
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }
}

/// Versioned resource routes.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/customers", handlers::customers::customer_routes())
        .nest("/suppliers", handlers::suppliers::supplier_routes())
        .nest("/products", handlers::products::product_routes())
        .nest("/orders", handlers::orders::order_routes())
        .nest("/contacts", record_routes::<contact::Entity>())
        .nest(
            "/product-suppliers",
            record_routes::<product_supplier::Entity>(),
        )
        .nest(
            "/order-product-suppliers",
            record_routes::<order_product_supplier::Entity>(),
        )
}

/// Full application router with health checks and the HTTP middleware stack.
pub fn build_router(state: AppState) -> Router {
    let request_timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::<AppState>::new()
        .nest("/api/v1", api_v1_routes())
        .nest("/health", health::health_routes())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        .layer(TimeoutLayer::new(request_timeout))
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}
