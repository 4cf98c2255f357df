use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use super::{ParentRef, StoreEntity};

/// Address and phone details of either a customer or a supplier.
///
/// At most one live contact exists per owner; the store enforces this with
/// partial unique indexes on `customer_id` and `supplier_id`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub phone: String,
    pub secondary_phone: Option<String>,
    pub postal_code: String,
    pub area: String,
    pub district: String,
    pub address_number: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub email: Option<String>,
    pub customer_id: Option<i32>,
    pub supplier_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInput {
    pub phone: String,
    #[serde(default)]
    pub secondary_phone: Option<String>,
    pub postal_code: String,
    pub area: String,
    pub district: String,
    pub address_number: String,
    pub city: String,
    pub state: String,
    pub country: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub customer_id: Option<i32>,
    #[serde(default)]
    pub supplier_id: Option<i32>,
}

impl From<Model> for ContactInput {
    fn from(model: Model) -> Self {
        Self {
            phone: model.phone,
            secondary_phone: model.secondary_phone,
            postal_code: model.postal_code,
            area: model.area,
            district: model.district,
            address_number: model.address_number,
            city: model.city,
            state: model.state,
            country: model.country,
            email: model.email,
            customer_id: model.customer_id,
            supplier_id: model.supplier_id,
        }
    }
}

impl StoreEntity for Entity {
    type Input = ContactInput;

    const NAME: &'static str = "Contact";
    const PLURAL: &'static str = "contacts";

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

    fn draft(input: ContactInput) -> ActiveModel {
        ActiveModel {
            phone: Set(input.phone),
            secondary_phone: Set(input.secondary_phone),
            postal_code: Set(input.postal_code),
            area: Set(input.area),
            district: Set(input.district),
            address_number: Set(input.address_number),
            city: Set(input.city),
            state: Set(input.state),
            country: Set(input.country),
            email: Set(input.email),
            customer_id: Set(input.customer_id),
            supplier_id: Set(input.supplier_id),
            ..Default::default()
        }
    }

    fn parents(input: &ContactInput) -> Vec<ParentRef> {
        input
            .customer_id
            .map(ParentRef::Customer)
            .into_iter()
            .chain(input.supplier_id.map(ParentRef::Supplier))
            .collect()
    }
}
