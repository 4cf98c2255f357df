use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use super::{ChildRef, StoreEntity};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub code: String,
    pub sales: i32,
    pub market_value: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_supplier::Entity")]
    ProductSuppliers,
}

impl Related<super::product_supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductSuppliers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub sales: i32,
    #[serde(default)]
    pub market_value: Option<Decimal>,
}

impl From<Model> for ProductInput {
    fn from(model: Model) -> Self {
        Self {
            name: model.name,
            code: model.code,
            sales: model.sales,
            market_value: model.market_value,
        }
    }
}

impl StoreEntity for Entity {
    type Input = ProductInput;

    const NAME: &'static str = "Product";
    const PLURAL: &'static str = "products";

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

    fn draft(input: ProductInput) -> ActiveModel {
        ActiveModel {
            name: Set(input.name),
            code: Set(input.code),
            sales: Set(input.sales),
            market_value: Set(input.market_value),
            ..Default::default()
        }
    }

    fn children() -> &'static [ChildRef] {
        &[ChildRef::ProductSuppliersByProduct]
    }
}
