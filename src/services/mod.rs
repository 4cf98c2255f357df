pub mod records;
pub mod relations;

pub use records::RecordService;

use crate::entities::{
    contact, customer, order, order_product_supplier, product, product_supplier, supplier,
};

pub type CustomerService = RecordService<customer::Entity>;
pub type OrderService = RecordService<order::Entity>;
pub type ContactService = RecordService<contact::Entity>;
pub type ProductService = RecordService<product::Entity>;
pub type SupplierService = RecordService<supplier::Entity>;
pub type ProductSupplierService = RecordService<product_supplier::Entity>;
pub type OrderProductSupplierService = RecordService<order_product_supplier::Entity>;
