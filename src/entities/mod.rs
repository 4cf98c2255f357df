//! Persistent store entities.
//!
//! Every entity carries a store-generated `i32` id, `created_at`, `updated_at`
//! and a nullable `deleted_at`. Rows with `deleted_at` set are soft-deleted and
//! invisible to every read.

use sea_orm::EntityTrait;
use serde::de::DeserializeOwned;

pub mod contact;
pub mod customer;
pub mod order;
pub mod order_product_supplier;
pub mod product;
pub mod product_supplier;
pub mod supplier;

/// A parent row a write depends on. Must be live when the write happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParentRef {
    Customer(i32),
    Supplier(i32),
    Product(i32),
    Order(i32),
    ProductSupplier(i32),
}

/// A foreign key column that points at another entity. Deleting the target is
/// refused while a live row still holds its id in this column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChildRef {
    OrdersByCustomer,
    ContactsByCustomer,
    ContactsBySupplier,
    ProductSuppliersByProduct,
    ProductSuppliersBySupplier,
    OrderProductsByOrder,
    OrderProductsByProductSupplier,
}

/// Contract between an entity and the generic repository.
pub trait StoreEntity: EntityTrait {
    /// Caller-supplied fields; everything except id and timestamps.
    type Input: DeserializeOwned + Send + Sync + 'static;

    /// Singular display name used in messages ("Customer").
    const NAME: &'static str;
    /// Collection name used in messages and metrics labels ("customers").
    const PLURAL: &'static str;

    fn id_column() -> Self::Column;
    fn created_at_column() -> Self::Column;
    fn updated_at_column() -> Self::Column;
    fn deleted_at_column() -> Self::Column;

    fn record_id(model: &Self::Model) -> i32;

    /// Active model with every caller-supplied field set and everything else untouched.
    fn draft(input: Self::Input) -> Self::ActiveModel;

    /// Parent rows referenced by `input`.
    fn parents(_input: &Self::Input) -> Vec<ParentRef> {
        Vec::new()
    }

    /// Foreign keys in other tables that reference this entity.
    fn children() -> &'static [ChildRef] {
        &[]
    }
}
