use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr,
    IsolationLevel, TransactionTrait,
};
use std::sync::Arc;

use crate::entities::{
    contact, customer, order, order_product_supplier, product, product_supplier, supplier,
};

pub mod catalog_repository;
pub mod contact_repository;
pub mod customer_repository;
pub mod entity_repository;
pub mod order_repository;

pub use catalog_repository::{ProductWithSuppliers, SupplierWithContact, SupplierWithProducts};
pub use customer_repository::{CustomerWithContact, CustomerWithOrders};
pub use entity_repository::EntityRepository;
pub use order_repository::OrderWithOrderProducts;

pub type CustomerRepository = EntityRepository<customer::Entity>;
pub type OrderRepository = EntityRepository<order::Entity>;
pub type ContactRepository = EntityRepository<contact::Entity>;
pub type ProductRepository = EntityRepository<product::Entity>;
pub type SupplierRepository = EntityRepository<supplier::Entity>;
pub type ProductSupplierRepository = EntityRepository<product_supplier::Entity>;
pub type OrderProductSupplierRepository = EntityRepository<order_product_supplier::Entity>;

/// Repository trait for common database operations
pub trait Repository {
    fn get_db(&self) -> &DatabaseConnection;
}

#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: Arc<DatabaseConnection>,
}

impl BaseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Opens a read-only transaction so multi-query reads observe one snapshot.
    ///
    /// SQLite transactions are already serializable and reject access-mode
    /// hints, so the defaults are used there.
    pub async fn begin_read(&self) -> Result<DatabaseTransaction, DbErr> {
        match self.db.get_database_backend() {
            DbBackend::Sqlite => self.db.begin().await,
            _ => {
                self.db
                    .begin_with_config(
                        Some(IsolationLevel::RepeatableRead),
                        Some(AccessMode::ReadOnly),
                    )
                    .await
            }
        }
    }
}

impl Repository for BaseRepository {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}
