use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use super::{ParentRef, StoreEntity};

/// Order line. Carries the price and discount agreed when the order was
/// placed, independent of the current catalog price.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_product_suppliers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_id: i32,
    pub product_supplier_id: i32,
    pub value: Decimal,
    pub discount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
    #[sea_orm(
        belongs_to = "super::product_supplier::Entity",
        from = "Column::ProductSupplierId",
        to = "super::product_supplier::Column::Id"
    )]
    ProductSupplier,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::product_supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductSupplier.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderProductSupplierInput {
    pub order_id: i32,
    pub product_supplier_id: i32,
    pub value: Decimal,
    #[serde(default)]
    pub discount: Decimal,
}

impl From<Model> for OrderProductSupplierInput {
    fn from(model: Model) -> Self {
        Self {
            order_id: model.order_id,
            product_supplier_id: model.product_supplier_id,
            value: model.value,
            discount: model.discount,
        }
    }
}

impl StoreEntity for Entity {
    type Input = OrderProductSupplierInput;

    const NAME: &'static str = "Order product";
    const PLURAL: &'static str = "order products";

    fn id_column() -> Column {
        Column::Id
    }

    fn created_at_column() -> Column {
        Column::CreatedAt
    }

    fn updated_at_column() -> Column {
        Column::UpdatedAt
    }

    fn deleted_at_column() -> Column {
        Column::DeletedAt
    }

    fn record_id(model: &Model) -> i32 {
        model.id
    }

    fn draft(input: OrderProductSupplierInput) -> ActiveModel {
        ActiveModel {
            order_id: Set(input.order_id),
            product_supplier_id: Set(input.product_supplier_id),
            value: Set(input.value),
            discount: Set(input.discount),
            ..Default::default()
        }
    }

    fn parents(input: &OrderProductSupplierInput) -> Vec<ParentRef> {
        vec![
            ParentRef::Order(input.order_id),
            ParentRef::ProductSupplier(input.product_supplier_id),
        ]
    }
}
