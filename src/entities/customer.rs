use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use super::{ChildRef, StoreEntity};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub birthday: DateTime<Utc>,
    pub tax_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    #[sea_orm(has_one = "super::contact::Entity")]
    Contact,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contact.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInput {
    pub first_name: String,
    pub last_name: String,
    pub birthday: DateTime<Utc>,
    pub tax_id: String,
}

impl From<Model> for CustomerInput {
    fn from(model: Model) -> Self {
        Self {
            first_name: model.first_name,
            last_name: model.last_name,
            birthday: model.birthday,
            tax_id: model.tax_id,
        }
    }
}

impl StoreEntity for Entity {
    type Input = CustomerInput;

    const NAME: &'static str = "Customer";
    const PLURAL: &'static str = "customers";

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

    fn draft(input: CustomerInput) -> ActiveModel {
        ActiveModel {
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            birthday: Set(input.birthday),
            tax_id: Set(input.tax_id),
            ..Default::default()
        }
    }

    fn children() -> &'static [ChildRef] {
        &[ChildRef::OrdersByCustomer, ChildRef::ContactsByCustomer]
    }
}
