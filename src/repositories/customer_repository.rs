use sea_orm::{ColumnTrait, ModelTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::entities::{contact, customer, order};
use crate::errors::ServiceError;

use super::EntityRepository;

/// A customer together with its live orders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerWithOrders {
    #[serde(flatten)]
    pub customer: customer::Model,
    pub orders: Vec<order::Model>,
}

/// A customer together with its live contact, if any.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerWithContact {
    #[serde(flatten)]
    pub customer: customer::Model,
    pub contact: Option<contact::Model>,
}

impl EntityRepository<customer::Entity> {
    pub async fn get_customer_with_orders(
        &self,
        id: i32,
    ) -> Result<CustomerWithOrders, ServiceError> {
        let txn = self.base.begin_read().await?;

        let customer = Self::find_live(&txn, id).await?;
        let orders = customer
            .find_related(order::Entity)
            .filter(order::Column::DeletedAt.is_null())
            .order_by_asc(order::Column::Id)
            .all(&txn)
            .await?;

        txn.commit().await?;
        Ok(CustomerWithOrders { customer, orders })
    }

    pub async fn get_customer_with_contact(
        &self,
        id: i32,
    ) -> Result<CustomerWithContact, ServiceError> {
        let txn = self.base.begin_read().await?;

        let customer = Self::find_live(&txn, id).await?;
        let contact = customer
            .find_related(contact::Entity)
            .filter(contact::Column::DeletedAt.is_null())
            .order_by_asc(contact::Column::Id)
            .one(&txn)
            .await?;

        txn.commit().await?;
        Ok(CustomerWithContact { customer, contact })
    }
}
