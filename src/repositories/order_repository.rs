use sea_orm::{ColumnTrait, ModelTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::entities::{order, order_product_supplier};
use crate::errors::ServiceError;

use super::EntityRepository;

/// An order together with its live order lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWithOrderProducts {
    #[serde(flatten)]
    pub order: order::Model,
    pub order_products: Vec<order_product_supplier::Model>,
}

impl EntityRepository<order::Entity> {
    pub async fn get_order_with_order_products(
        &self,
        id: i32,
    ) -> Result<OrderWithOrderProducts, ServiceError> {
        let txn = self.base.begin_read().await?;

        let order = Self::find_live(&txn, id).await?;
        let order_products = order
            .find_related(order_product_supplier::Entity)
            .filter(order_product_supplier::Column::DeletedAt.is_null())
            .order_by_asc(order_product_supplier::Column::Id)
            .all(&txn)
            .await?;

        txn.commit().await?;
        Ok(OrderWithOrderProducts {
            order,
            order_products,
        })
    }
}
