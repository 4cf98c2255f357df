mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;

fn customer_body(first_name: &str) -> serde_json::Value {
    json!({
        "first_name": first_name,
        "last_name": "Lima",
        "birthday": "1990-05-17T12:00:00Z",
        "tax_id": "123.456.789-00"
    })
}

fn order_body(customer_id: i64, number: &str) -> serde_json::Value {
    json!({
        "customer_id": customer_id,
        "order_date": "2024-03-01T12:00:00Z",
        "delivery_date": "2024-03-08T12:00:00Z",
        "uk_order_number": number
    })
}

fn contact_body(supplier_id: i64) -> serde_json::Value {
    json!({
        "phone": "+55 11 5555-0100",
        "postal_code": "01310-100",
        "area": "Centro",
        "district": "Bela Vista",
        "address_number": "1578",
        "city": "Sao Paulo",
        "state": "SP",
        "country": "BR",
        "supplier_id": supplier_id
    })
}

#[tokio::test]
async fn customer_crud_round_trip() {
    let app = TestApp::new().await;

    let (status, created) = app
        .request_json(Method::POST, "/api/v1/customers", Some(customer_body("Ana")))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().expect("id in response");
    assert_eq!(created["first_name"], "Ana");
    assert!(created["deleted_at"].is_null());

    let (status, fetched) = app
        .request_json(Method::GET, &format!("/api/v1/customers/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = app
        .request_json(
            Method::PUT,
            &format!("/api/v1/customers/{id}"),
            Some(customer_body("Ana Maria")),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["first_name"], "Ana Maria");
    assert_eq!(updated["created_at"], created["created_at"]);

    let (status, body) = app
        .request_json(Method::DELETE, &format!("/api/v1/customers/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Customer deleted successfully");

    let (status, body) = app
        .request_json(Method::GET, &format!("/api/v1/customers/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn unparseable_path_id_is_treated_as_zero() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request_json(Method::GET, "/api/v1/customers/abc", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"]
        .as_str()
        .expect("message")
        .contains("with id 0"));
}

#[tokio::test]
async fn body_with_missing_fields_is_unprocessable() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request_json(
            Method::POST,
            "/api/v1/customers",
            Some(json!({ "first_name": "Only" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Malformed request body");
    assert!(body["details"].as_str().expect("details").contains("last_name"));
}

#[tokio::test]
async fn body_that_is_not_json_is_bad_request() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request_raw(
            Method::POST,
            "/api/v1/customers",
            Some("application/json"),
            "{\"first_name\": ",
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Malformed request body");
}

#[tokio::test]
async fn body_without_json_content_type_is_unsupported() {
    let app = TestApp::new().await;

    let raw = customer_body("Ana").to_string();
    let (status, body) = app
        .request_raw(Method::POST, "/api/v1/customers", None, &raw)
        .await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["message"], "Malformed request body");

    let (status, _) = app
        .request_raw(Method::POST, "/api/v1/customers", Some("text/plain"), &raw)
        .await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let (_, listed) = app.request_json(Method::GET, "/api/v1/customers", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn bulk_delete_by_query_ids() {
    let app = TestApp::new().await;

    let mut ids = Vec::new();
    for name in ["A", "B"] {
        let (_, created) = app
            .request_json(Method::POST, "/api/v1/customers", Some(customer_body(name)))
            .await;
        ids.push(created["id"].as_i64().expect("id"));
    }

    let uri = format!("/api/v1/customers?ids={}&ids={}", ids[0], ids[1]);
    let (status, body) = app.request_json(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "2 customers deleted successfully");

    let (status, listed) = app.request_json(Method::GET, "/api/v1/customers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn bulk_delete_with_unknown_id_deletes_nothing() {
    let app = TestApp::new().await;

    let (_, created) = app
        .request_json(Method::POST, "/api/v1/customers", Some(customer_body("Keep")))
        .await;
    let id = created["id"].as_i64().expect("id");

    let uri = format!("/api/v1/customers?ids={id}&ids=999");
    let (status, _) = app.request_json(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request_json(Method::GET, &format!("/api/v1/customers/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn order_for_unknown_customer_is_unprocessable() {
    let app = TestApp::new().await;

    let (status, _) = app
        .request_json(
            Method::POST,
            "/api/v1/orders",
            Some(json!({
                "customer_id": 404,
                "order_date": "2024-03-01T12:00:00Z",
                "delivery_date": "2024-03-08T12:00:00Z",
                "uk_order_number": "UK-404"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn customer_orders_view_embeds_orders() {
    let app = TestApp::new().await;

    let (_, customer) = app
        .request_json(Method::POST, "/api/v1/customers", Some(customer_body("Ana")))
        .await;
    let id = customer["id"].as_i64().expect("id");

    for number in ["UK-1", "UK-2"] {
        let (status, _) = app
            .request_json(
                Method::POST,
                "/api/v1/orders",
                Some(json!({
                    "customer_id": id,
                    "order_date": "2024-03-01T12:00:00Z",
                    "delivery_date": "2024-03-08T12:00:00Z",
                    "delivery_order": true,
                    "discount": "1.5",
                    "uk_order_number": number
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, view) = app
        .request_json(Method::GET, &format!("/api/v1/customers/{id}/orders"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["first_name"], "Ana");
    let orders = view["orders"].as_array().expect("orders array");
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["uk_order_number"], "UK-1");

    let (status, view) = app
        .request_json(Method::GET, &format!("/api/v1/customers/{id}/contact"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(view["contact"].is_null());
}

#[tokio::test]
async fn request_id_is_echoed() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health/live", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn health_reports_database_up() {
    let app = TestApp::new().await;

    let (status, body) = app.request_json(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn deleting_a_customer_with_live_orders_is_a_conflict() {
    let app = TestApp::new().await;

    let (_, customer) = app
        .request_json(Method::POST, "/api/v1/customers", Some(customer_body("Ana")))
        .await;
    let id = customer["id"].as_i64().expect("id");
    let (status, order) = app
        .request_json(Method::POST, "/api/v1/orders", Some(order_body(id, "UK-9")))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .request_json(Method::DELETE, &format!("/api/v1/customers/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");

    let order_id = order["id"].as_i64().expect("order id");
    let (status, _) = app
        .request_json(Method::DELETE, &format!("/api/v1/orders/{order_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .request_json(Method::DELETE, &format!("/api/v1/customers/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn catalog_and_order_line_routes() {
    let app = TestApp::new().await;

    let (status, supplier) = app
        .request_json(
            Method::POST,
            "/api/v1/suppliers",
            Some(json!({ "name": "Acme", "tax_id": "SUP-1", "quantity_stock": 50 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let supplier_id = supplier["id"].as_i64().expect("supplier id");

    let (status, product) = app
        .request_json(
            Method::POST,
            "/api/v1/products",
            Some(json!({ "name": "Widget", "code": "W-1", "market_value": "12.5" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let product_id = product["id"].as_i64().expect("product id");

    let (status, link) = app
        .request_json(
            Method::POST,
            "/api/v1/product-suppliers",
            Some(json!({
                "product_id": product_id,
                "supplier_id": supplier_id,
                "cost": "7.25",
                "value": "12.5",
                "quantity": 40
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let link_id = link["id"].as_i64().expect("link id");

    let (status, contact) = app
        .request_json(Method::POST, "/api/v1/contacts", Some(contact_body(supplier_id)))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(contact["supplier_id"], supplier_id);
    let (status, fetched) = app
        .request_json(
            Method::GET,
            &format!("/api/v1/contacts/{}", contact["id"]),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, contact);

    let (_, customer) = app
        .request_json(Method::POST, "/api/v1/customers", Some(customer_body("Ana")))
        .await;
    let customer_id = customer["id"].as_i64().expect("customer id");
    let (_, order) = app
        .request_json(Method::POST, "/api/v1/orders", Some(order_body(customer_id, "UK-7")))
        .await;
    let order_id = order["id"].as_i64().expect("order id");

    let (status, line) = app
        .request_json(
            Method::POST,
            "/api/v1/order-product-suppliers",
            Some(json!({
                "order_id": order_id,
                "product_supplier_id": link_id,
                "value": "12.5"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, lines) = app
        .request_json(Method::GET, "/api/v1/order-product-suppliers", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lines, json!([line.clone()]));

    let (status, view) = app
        .request_json(Method::GET, &format!("/api/v1/products/{product_id}/suppliers"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["code"], "W-1");
    assert_eq!(view["product_suppliers"], json!([link.clone()]));

    let (status, view) = app
        .request_json(Method::GET, &format!("/api/v1/suppliers/{supplier_id}/products"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["name"], "Acme");
    assert_eq!(view["product_suppliers"], json!([link]));

    let (status, view) = app
        .request_json(Method::GET, &format!("/api/v1/suppliers/{supplier_id}/contact"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["contact"], contact);

    let (status, contacts) = app
        .request_json(Method::GET, &format!("/api/v1/suppliers/{supplier_id}/contacts"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(contacts, json!([contact]));

    let (status, view) = app
        .request_json(Method::GET, &format!("/api/v1/orders/{order_id}/order-products"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["uk_order_number"], "UK-7");
    assert_eq!(view["order_products"], json!([line]));

    let (status, _) = app
        .request_json(Method::GET, "/api/v1/suppliers/999/products", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
