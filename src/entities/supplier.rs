use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use super::{ChildRef, StoreEntity};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub tax_id: String,
    /// Trading name, when it differs from the registered one.
    pub fantasy_name: Option<String>,
    pub sales: i32,
    pub quantity_stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_supplier::Entity")]
    ProductSuppliers,
    #[sea_orm(has_one = "super::contact::Entity")]
    Contact,
}

impl Related<super::product_supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductSuppliers.def()
    }
}

impl Related<super::contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contact.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierInput {
    pub name: String,
    pub tax_id: String,
    #[serde(default)]
    pub fantasy_name: Option<String>,
    #[serde(default)]
    pub sales: i32,
    #[serde(default)]
    pub quantity_stock: i32,
}

impl From<Model> for SupplierInput {
    fn from(model: Model) -> Self {
        Self {
            name: model.name,
            tax_id: model.tax_id,
            fantasy_name: model.fantasy_name,
            sales: model.sales,
            quantity_stock: model.quantity_stock,
        }
    }
}

impl StoreEntity for Entity {
    type Input = SupplierInput;

    const NAME: &'static str = "Supplier";
    const PLURAL: &'static str = "suppliers";

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

    fn draft(input: SupplierInput) -> ActiveModel {
        ActiveModel {
            name: Set(input.name),
            tax_id: Set(input.tax_id),
            fantasy_name: Set(input.fantasy_name),
            sales: Set(input.sales),
            quantity_stock: Set(input.quantity_stock),
            ..Default::default()
        }
    }

    fn children() -> &'static [ChildRef] {
        &[ChildRef::ContactsBySupplier, ChildRef::ProductSuppliersBySupplier]
    }
}
