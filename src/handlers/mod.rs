pub mod common;
pub mod customers;
pub mod orders;
pub mod products;
pub mod records;
pub mod suppliers;

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::entities::StoreEntity;
use crate::services::{
    ContactService, CustomerService, OrderProductSupplierService, OrderService, ProductService,
    ProductSupplierService, RecordService, SupplierService,
};

/// Services layer used by HTTP handlers. Every service shares the injected pool.
#[derive(Clone, Debug)]
pub struct AppServices {
    db: Arc<DatabaseConnection>,
}

impl AppServices {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Service for any store entity.
    pub fn records<E: StoreEntity>(&self) -> RecordService<E> {
        RecordService::new(self.db.clone())
    }

    pub fn customers(&self) -> CustomerService {
        self.records()
    }

    pub fn orders(&self) -> OrderService {
        self.records()
    }

    pub fn contacts(&self) -> ContactService {
        self.records()
    }

    pub fn products(&self) -> ProductService {
        self.records()
    }

    pub fn suppliers(&self) -> SupplierService {
        self.records()
    }

    pub fn product_suppliers(&self) -> ProductSupplierService {
        self.records()
    }

    pub fn order_product_suppliers(&self) -> OrderProductSupplierService {
        self.records()
    }
}
