//! Relationship-aware reads, each served from a single read transaction.

use tracing::instrument;

use crate::entities::{contact, customer, order, product, supplier, StoreEntity};
use crate::errors::ServiceError;
use crate::repositories::{
    CustomerWithContact, CustomerWithOrders, OrderWithOrderProducts, ProductWithSuppliers,
    SupplierWithContact, SupplierWithProducts,
};

use super::records::{record_outcome, RecordService};

impl RecordService<customer::Entity> {
    #[instrument(skip(self))]
    pub async fn get_customer_with_orders(
        &self,
        id: i32,
    ) -> Result<CustomerWithOrders, ServiceError> {
        let result = self.repository.get_customer_with_orders(id).await;
        record_outcome(customer::Entity::PLURAL, "with_orders", &result);
        result
    }

    #[instrument(skip(self))]
    pub async fn get_customer_with_contact(
        &self,
        id: i32,
    ) -> Result<CustomerWithContact, ServiceError> {
        let result = self.repository.get_customer_with_contact(id).await;
        record_outcome(customer::Entity::PLURAL, "with_contact", &result);
        result
    }
}

impl RecordService<order::Entity> {
    #[instrument(skip(self))]
    pub async fn get_order_with_order_products(
        &self,
        id: i32,
    ) -> Result<OrderWithOrderProducts, ServiceError> {
        let result = self.repository.get_order_with_order_products(id).await;
        record_outcome(order::Entity::PLURAL, "with_order_products", &result);
        result
    }
}

impl RecordService<contact::Entity> {
    #[instrument(skip(self))]
    pub async fn get_all_by_customer_id(
        &self,
        customer_id: i32,
    ) -> Result<Vec<contact::Model>, ServiceError> {
        let result = self.repository.get_all_by_customer_id(customer_id).await;
        record_outcome(contact::Entity::PLURAL, "by_customer", &result);
        result
    }

    #[instrument(skip(self))]
    pub async fn get_all_by_supplier_id(
        &self,
        supplier_id: i32,
    ) -> Result<Vec<contact::Model>, ServiceError> {
        let result = self.repository.get_all_by_supplier_id(supplier_id).await;
        record_outcome(contact::Entity::PLURAL, "by_supplier", &result);
        result
    }
}

impl RecordService<product::Entity> {
    #[instrument(skip(self))]
    pub async fn get_product_with_suppliers(
        &self,
        id: i32,
    ) -> Result<ProductWithSuppliers, ServiceError> {
        let result = self.repository.get_product_with_suppliers(id).await;
        record_outcome(product::Entity::PLURAL, "with_suppliers", &result);
        result
    }
}

impl RecordService<supplier::Entity> {
    #[instrument(skip(self))]
    pub async fn get_supplier_with_products(
        &self,
        id: i32,
    ) -> Result<SupplierWithProducts, ServiceError> {
        let result = self.repository.get_supplier_with_products(id).await;
        record_outcome(supplier::Entity::PLURAL, "with_products", &result);
        result
    }

    #[instrument(skip(self))]
    pub async fn get_supplier_with_contact(
        &self,
        id: i32,
    ) -> Result<SupplierWithContact, ServiceError> {
        let result = self.repository.get_supplier_with_contact(id).await;
        record_outcome(supplier::Entity::PLURAL, "with_contact", &result);
        result
    }
}
