use sea_orm::{ColumnTrait, QueryFilter, QueryOrder};

use crate::entities::contact;
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::EntityRepository;

impl EntityRepository<contact::Entity> {
    /// Live contacts owned by a customer. Empty when there are none.
    pub async fn get_all_by_customer_id(
        &self,
        customer_id: i32,
    ) -> Result<Vec<contact::Model>, ServiceError> {
        Ok(Self::live()
            .filter(contact::Column::CustomerId.eq(customer_id))
            .order_by_asc(contact::Column::Id)
            .all(self.base.get_db())
            .await?)
    }

    /// Live contacts owned by a supplier. Empty when there are none.
    pub async fn get_all_by_supplier_id(
        &self,
        supplier_id: i32,
    ) -> Result<Vec<contact::Model>, ServiceError> {
        Ok(Self::live()
            .filter(contact::Column::SupplierId.eq(supplier_id))
            .order_by_asc(contact::Column::Id)
            .all(self.base.get_db())
            .await?)
    }
}
