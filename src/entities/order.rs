use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use super::{ChildRef, ParentRef, StoreEntity};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer_id: i32,
    pub order_date: DateTime<Utc>,
    pub delivery_date: DateTime<Utc>,
    /// Whether the order ships to the customer rather than being collected.
    pub delivery_order: bool,
    pub discount: Decimal,
    /// External order number.
    pub uk_order_number: String,
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
    #[sea_orm(has_many = "super::order_product_supplier::Entity")]
    OrderProducts,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::order_product_supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderInput {
    pub customer_id: i32,
    pub order_date: DateTime<Utc>,
    pub delivery_date: DateTime<Utc>,
    #[serde(default)]
    pub delivery_order: bool,
    #[serde(default)]
    pub discount: Decimal,
    pub uk_order_number: String,
}

impl From<Model> for OrderInput {
    fn from(model: Model) -> Self {
        Self {
            customer_id: model.customer_id,
            order_date: model.order_date,
            delivery_date: model.delivery_date,
            delivery_order: model.delivery_order,
            discount: model.discount,
            uk_order_number: model.uk_order_number,
        }
    }
}

impl StoreEntity for Entity {
    type Input = OrderInput;

    const NAME: &'static str = "Order";
    const PLURAL: &'static str = "orders";

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

    fn draft(input: OrderInput) -> ActiveModel {
        ActiveModel {
            customer_id: Set(input.customer_id),
            order_date: Set(input.order_date),
            delivery_date: Set(input.delivery_date),
            delivery_order: Set(input.delivery_order),
            discount: Set(input.discount),
            uk_order_number: Set(input.uk_order_number),
            ..Default::default()
        }
    }

    fn parents(input: &OrderInput) -> Vec<ParentRef> {
        vec![ParentRef::Customer(input.customer_id)]
    }

    fn children() -> &'static [ChildRef] {
        &[ChildRef::OrderProductsByOrder]
    }
}
