#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use store_api::{
    config::AppConfig,
    db,
    entities::{
        contact::ContactInput, customer::CustomerInput, order::OrderInput,
        product::ProductInput, supplier::SupplierInput,
    },
    AppState,
};
use tempfile::TempDir;
use tower::ServiceExt;

/// Helper harness for spinning up an application state backed by a throwaway SQLite file.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _dir: TempDir,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir for test database");
        let db_path = dir.path().join("store_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool, cfg.db_schema.as_deref())
            .await
            .expect("failed to run migrations in tests");

        let state = AppState::new(Arc::new(pool), cfg);
        let router = store_api::build_router(state.clone());

        Self {
            router,
            state,
            _dir: dir,
        }
    }

    /// Send a request against the router.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Sends a body as given, with an optional content type.
    pub async fn request_raw(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let request = builder
            .body(Body::from(body.to_string()))
            .expect("failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request");
        let status = response.status();
        (status, response_json(response).await)
    }

    /// Sends a request and decodes the JSON response body.
    pub async fn request_json(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let response = self.request(method, uri, body).await;
        let status = response.status();
        (status, response_json(response).await)
    }
}

pub async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is json")
    }
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid test date")
}

pub fn customer_input(first_name: &str, last_name: &str) -> CustomerInput {
    CustomerInput {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        birthday: at(1990, 5, 17),
        tax_id: format!("TAX-{}-{}", first_name, last_name),
    }
}

pub fn supplier_input(name: &str) -> SupplierInput {
    SupplierInput {
        name: name.to_string(),
        tax_id: format!("SUP-{}", name),
        fantasy_name: None,
        sales: 0,
        quantity_stock: 0,
    }
}

pub fn product_input(code: &str) -> ProductInput {
    ProductInput {
        name: format!("Product {}", code),
        code: code.to_string(),
        sales: 0,
        market_value: None,
    }
}

pub fn order_input(customer_id: i32, number: &str, discount: Decimal) -> OrderInput {
    OrderInput {
        customer_id,
        order_date: at(2024, 3, 1),
        delivery_date: at(2024, 3, 8),
        delivery_order: true,
        discount,
        uk_order_number: number.to_string(),
    }
}

pub fn contact_input(customer_id: Option<i32>, supplier_id: Option<i32>) -> ContactInput {
    ContactInput {
        phone: "+55 11 5555-0100".to_string(),
        postal_code: "01310-100".to_string(),
        area: "Centro".to_string(),
        district: "Bela Vista".to_string(),
        address_number: "1578".to_string(),
        city: "Sao Paulo".to_string(),
        state: "SP".to_string(),
        country: "BR".to_string(),
        customer_id,
        supplier_id,
        ..Default::default()
    }
}
