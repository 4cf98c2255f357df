mod common;

use std::fmt::Debug;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;
use sea_orm::{ConnectionTrait, DbBackend, IntoActiveModel, Statement};
use store_api::{
    entities::{
        contact, customer::{self, CustomerInput}, order::{self, OrderInput},
        order_product_supplier::{self, OrderProductSupplierInput},
        product::{self, ProductInput},
        product_supplier::{self, ProductSupplierInput}, supplier, StoreEntity,
    },
    errors::ServiceError,
};

use common::{contact_input, customer_input, order_input, product_input, supplier_input, TestApp};

async fn assert_round_trip<E>(app: &TestApp, input: E::Input) -> i32
where
    E: StoreEntity,
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: Send,
    E::Input: From<E::Model> + Clone + PartialEq + Debug,
{
    let service = app.state.services.records::<E>();

    let created = service.create(input.clone()).await.expect("create");
    let id = E::record_id(&created);
    assert!(id > 0, "{} id must be store-assigned", E::NAME);
    assert_eq!(E::Input::from(created), input);

    let fetched = service.get_by_id(id).await.expect("get");
    assert_eq!(E::Input::from(fetched), input, "{} fields changed on read", E::NAME);
    id
}

#[tokio::test]
async fn create_then_get_returns_the_same_record() {
    let app = TestApp::new().await;
    let customers = app.state.services.customers();

    let input = customer_input("Ana", "Lima");
    let created = customers.create(input.clone()).await.expect("create customer");
    assert!(created.id > 0);
    assert!(created.deleted_at.is_none());
    assert_eq!(created.created_at, created.updated_at);

    let fetched = customers.get_by_id(created.id).await.expect("get customer");
    assert_eq!(fetched.id, created.id);
    assert_eq!(CustomerInput::from(fetched), input);
}

#[tokio::test]
async fn every_entity_reads_back_what_was_written() {
    let app = TestApp::new().await;

    let customer_id = assert_round_trip::<customer::Entity>(&app, customer_input("Ana", "Lima")).await;
    let supplier_id = assert_round_trip::<supplier::Entity>(
        &app,
        supplier::SupplierInput {
            fantasy_name: Some("Acme Co".to_string()),
            sales: 3,
            quantity_stock: 120,
            ..supplier_input("Acme")
        },
    )
    .await;
    let product_id = assert_round_trip::<product::Entity>(
        &app,
        ProductInput {
            market_value: Some(dec!(12.5)),
            ..product_input("SKU-1")
        },
    )
    .await;
    assert_round_trip::<contact::Entity>(
        &app,
        contact::ContactInput {
            email: Some("ana@example.com".to_string()),
            secondary_phone: Some("+55 11 5555-0199".to_string()),
            ..contact_input(Some(customer_id), None)
        },
    )
    .await;
    let order_id =
        assert_round_trip::<order::Entity>(&app, order_input(customer_id, "UK-10", dec!(1.5))).await;
    let product_supplier_id = assert_round_trip::<product_supplier::Entity>(
        &app,
        ProductSupplierInput {
            product_id,
            supplier_id,
            cost: dec!(7.25),
            value: dec!(12.5),
            quantity: 40,
            supplier_product_code: Some("A-1".to_string()),
            supplier_product_name: Some("Widget".to_string()),
            sales: 2,
        },
    )
    .await;
    assert_round_trip::<order_product_supplier::Entity>(
        &app,
        OrderProductSupplierInput {
            order_id,
            product_supplier_id,
            value: dec!(12.5),
            discount: dec!(0.75),
        },
    )
    .await;
}

#[tokio::test]
async fn ids_are_assigned_by_the_store() {
    let app = TestApp::new().await;
    let products = app.state.services.products();

    let first = products.create(product_input("P-1")).await.expect("create");
    let second = products.create(product_input("P-2")).await.expect("create");

    assert_ne!(first.id, second.id);
    let listed: Vec<i32> = products
        .get_all()
        .await
        .expect("list")
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(listed, vec![first.id, second.id]);
}

#[tokio::test]
async fn get_missing_id_is_not_found() {
    let app = TestApp::new().await;

    let result = app.state.services.customers().get_by_id(4242).await;
    assert_matches!(result, Err(ServiceError::NotFound(msg)) if msg == "Customer with id 4242 not found");
}

#[tokio::test]
async fn update_overwrites_fields_and_keeps_created_at() {
    let app = TestApp::new().await;
    let products = app.state.services.products();

    let created = products.create(product_input("P-7")).await.expect("create");
    let replacement = ProductInput {
        name: "Renamed".to_string(),
        code: "P-7B".to_string(),
        sales: 12,
        market_value: Some(dec!(12.5)),
    };

    let updated = products
        .update(created.id, replacement.clone())
        .await
        .expect("update");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(ProductInput::from(updated), replacement);

    let fetched = products.get_by_id(created.id).await.expect("get");
    assert_eq!(ProductInput::from(fetched), replacement);
}

#[tokio::test]
async fn update_of_missing_id_never_creates_a_row() {
    let app = TestApp::new().await;
    let customers = app.state.services.customers();

    let result = customers.update(77, customer_input("Ghost", "Row")).await;
    assert_matches!(result, Err(ServiceError::NotFound(_)));
    assert!(customers.get_all().await.expect("list").is_empty());
}

#[tokio::test]
async fn delete_hides_the_record_but_keeps_the_row() {
    let app = TestApp::new().await;
    let customers = app.state.services.customers();

    let created = customers
        .create(customer_input("Bruno", "Souza"))
        .await
        .expect("create");
    customers.delete(created.id).await.expect("delete");

    assert_matches!(
        customers.get_by_id(created.id).await,
        Err(ServiceError::NotFound(_))
    );
    assert!(customers.get_all().await.expect("list").is_empty());

    let row = app
        .state
        .db
        .query_one(Statement::from_sql_and_values(
            DbBackend::Sqlite,
            "SELECT deleted_at FROM customers WHERE id = ?",
            [created.id.into()],
        ))
        .await
        .expect("raw query")
        .expect("row is still stored");
    let deleted_at: Option<String> = row.try_get("", "deleted_at").expect("deleted_at column");
    assert!(deleted_at.is_some());
}

#[tokio::test]
async fn deleting_twice_is_not_found() {
    let app = TestApp::new().await;
    let customers = app.state.services.customers();

    let created = customers
        .create(customer_input("Carla", "Dias"))
        .await
        .expect("create");
    customers.delete(created.id).await.expect("first delete");

    assert_matches!(
        customers.delete(created.id).await,
        Err(ServiceError::NotFound(_))
    );
}

#[tokio::test]
async fn update_of_deleted_record_is_not_found() {
    let app = TestApp::new().await;
    let customers = app.state.services.customers();

    let created = customers
        .create(customer_input("Davi", "Reis"))
        .await
        .expect("create");
    customers.delete(created.id).await.expect("delete");

    assert_matches!(
        customers
            .update(created.id, customer_input("Davi", "Updated"))
            .await,
        Err(ServiceError::NotFound(_))
    );
}

#[tokio::test]
async fn delete_all_then_get_all_is_empty() {
    let app = TestApp::new().await;
    let products = app.state.services.products();

    let mut ids = Vec::new();
    for code in ["A", "B", "C"] {
        ids.push(products.create(product_input(code)).await.expect("create").id);
    }

    let deleted = products.delete_all(&ids).await.expect("delete all");
    assert_eq!(deleted, 3);
    assert!(products.get_all().await.expect("list").is_empty());
}

#[tokio::test]
async fn delete_all_is_all_or_nothing() {
    let app = TestApp::new().await;
    let products = app.state.services.products();

    let kept = products.create(product_input("K")).await.expect("create");
    let result = products.delete_all(&[kept.id, 9999]).await;

    assert_matches!(result, Err(ServiceError::NotFound(msg)) if msg.contains("9999"));
    let fetched = products.get_by_id(kept.id).await.expect("still live");
    assert_eq!(fetched.id, kept.id);
}

#[tokio::test]
async fn delete_all_collapses_duplicates_and_accepts_empty() {
    let app = TestApp::new().await;
    let products = app.state.services.products();

    let created = products.create(product_input("D")).await.expect("create");

    assert_eq!(products.delete_all(&[]).await.expect("empty delete"), 0);
    assert_eq!(
        products
            .delete_all(&[created.id, created.id])
            .await
            .expect("duplicate ids"),
        1
    );
}

#[tokio::test]
async fn create_with_missing_parent_is_invalid_reference() {
    let app = TestApp::new().await;

    let result = app
        .state
        .services
        .orders()
        .create(order_input(31337, "UK-1", dec!(0)))
        .await;
    assert_matches!(result, Err(ServiceError::InvalidReference(msg)) if msg.contains("31337"));
}

#[tokio::test]
async fn update_cannot_point_at_a_deleted_parent() {
    let app = TestApp::new().await;
    let customers = app.state.services.customers();
    let orders = app.state.services.orders();

    let first = customers.create(customer_input("Eva", "Melo")).await.expect("create");
    let second = customers.create(customer_input("Caio", "Melo")).await.expect("create");
    let order = orders
        .create(order_input(first.id, "UK-2", dec!(2.5)))
        .await
        .expect("create order");
    customers.delete(second.id).await.expect("delete");

    let moved = OrderInput {
        customer_id: second.id,
        ..OrderInput::from(order.clone())
    };
    assert_matches!(
        orders.update(order.id, moved).await,
        Err(ServiceError::InvalidReference(_))
    );

    let unchanged = orders.get_by_id(order.id).await.expect("get order");
    assert_eq!(unchanged.customer_id, first.id);
}

#[tokio::test]
async fn deleting_a_referenced_customer_is_refused() {
    let app = TestApp::new().await;
    let customers = app.state.services.customers();
    let orders = app.state.services.orders();

    let owner = customers.create(customer_input("Gil", "Ramos")).await.expect("create");
    let order = orders
        .create(order_input(owner.id, "UK-5", dec!(0)))
        .await
        .expect("create order");

    assert_matches!(
        customers.delete(owner.id).await,
        Err(ServiceError::StillReferenced(msg)) if msg.contains(&order.id.to_string())
    );
    customers.get_by_id(owner.id).await.expect("customer is still live");

    // The order can still be saved as-is because its customer stayed live.
    orders
        .update(order.id, OrderInput::from(order.clone()))
        .await
        .expect("update order");
    let view = customers
        .get_customer_with_orders(owner.id)
        .await
        .expect("customer with orders");
    assert_eq!(view.orders.len(), 1);

    orders.delete(order.id).await.expect("delete order");
    customers.delete(owner.id).await.expect("delete once unreferenced");
}

#[tokio::test]
async fn delete_all_with_a_referenced_id_deletes_nothing() {
    let app = TestApp::new().await;
    let suppliers = app.state.services.suppliers();

    let free = suppliers.create(supplier_input("Free")).await.expect("create");
    let held = suppliers.create(supplier_input("Held")).await.expect("create");
    app.state
        .services
        .contacts()
        .create(contact_input(None, Some(held.id)))
        .await
        .expect("supplier contact");

    let err = suppliers
        .delete_all(&[free.id, held.id])
        .await
        .expect_err("referenced supplier blocks the batch");
    assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);
    assert_eq!(suppliers.get_all().await.expect("list").len(), 2);
}

#[tokio::test]
async fn deleted_children_do_not_block_parent_delete() {
    let app = TestApp::new().await;
    let products = app.state.services.products();
    let suppliers = app.state.services.suppliers();
    let links = app.state.services.product_suppliers();

    let product = products.create(product_input("SKU-L")).await.expect("product");
    let supplier = suppliers.create(supplier_input("Link")).await.expect("supplier");
    let link = links
        .create(ProductSupplierInput {
            product_id: product.id,
            supplier_id: supplier.id,
            cost: dec!(1.5),
            value: dec!(3),
            quantity: 1,
            supplier_product_code: None,
            supplier_product_name: None,
            sales: 0,
        })
        .await
        .expect("link");

    assert_matches!(products.delete(product.id).await, Err(ServiceError::StillReferenced(_)));
    links.delete(link.id).await.expect("delete link");
    products.delete(product.id).await.expect("delete product");
    suppliers.delete(supplier.id).await.expect("delete supplier");
}
