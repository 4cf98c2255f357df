use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use super::{ChildRef, ParentRef, StoreEntity};

/// Catalog entry: a product as offered by one supplier, with its cost and price.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_suppliers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: i32,
    pub supplier_id: i32,
    pub cost: Decimal,
    pub value: Decimal,
    pub quantity: i32,
    pub supplier_product_code: Option<String>,
    pub supplier_product_name: Option<String>,
    pub sales: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
    #[sea_orm(has_many = "super::order_product_supplier::Entity")]
    OrderProducts,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::order_product_supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSupplierInput {
    pub product_id: i32,
    pub supplier_id: i32,
    pub cost: Decimal,
    pub value: Decimal,
    pub quantity: i32,
    #[serde(default)]
    pub supplier_product_code: Option<String>,
    #[serde(default)]
    pub supplier_product_name: Option<String>,
    #[serde(default)]
    pub sales: i32,
}

impl From<Model> for ProductSupplierInput {
    fn from(model: Model) -> Self {
        Self {
            product_id: model.product_id,
            supplier_id: model.supplier_id,
            cost: model.cost,
            value: model.value,
            quantity: model.quantity,
            supplier_product_code: model.supplier_product_code,
            supplier_product_name: model.supplier_product_name,
            sales: model.sales,
        }
    }
}

impl StoreEntity for Entity {
    type Input = ProductSupplierInput;

    const NAME: &'static str = "Product supplier";
    const PLURAL: &'static str = "product suppliers";

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

    fn draft(input: ProductSupplierInput) -> ActiveModel {
        ActiveModel {
            product_id: Set(input.product_id),
            supplier_id: Set(input.supplier_id),
            cost: Set(input.cost),
            value: Set(input.value),
            quantity: Set(input.quantity),
            supplier_product_code: Set(input.supplier_product_code),
            supplier_product_name: Set(input.supplier_product_name),
            sales: Set(input.sales),
            ..Default::default()
        }
    }

    fn parents(input: &ProductSupplierInput) -> Vec<ParentRef> {
        vec![
            ParentRef::Product(input.product_id),
            ParentRef::Supplier(input.supplier_id),
        ]
    }

    fn children() -> &'static [ChildRef] {
        &[ChildRef::OrderProductsByProductSupplier]
    }
}
