use sea_orm::{ColumnTrait, ModelTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::entities::{contact, product, product_supplier, supplier};
use crate::errors::ServiceError;

use super::EntityRepository;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductWithSuppliers {
    #[serde(flatten)]
    pub product: product::Model,
    pub product_suppliers: Vec<product_supplier::Model>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierWithProducts {
    #[serde(flatten)]
    pub supplier: supplier::Model,
    pub product_suppliers: Vec<product_supplier::Model>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierWithContact {
    #[serde(flatten)]
    pub supplier: supplier::Model,
    pub contact: Option<contact::Model>,
}

impl EntityRepository<product::Entity> {
    /// A product and the live catalog entries offering it.
    pub async fn get_product_with_suppliers(
        &self,
        id: i32,
    ) -> Result<ProductWithSuppliers, ServiceError> {
        let txn = self.base.begin_read().await?;

        let product = Self::find_live(&txn, id).await?;
        let product_suppliers = product
            .find_related(product_supplier::Entity)
            .filter(product_supplier::Column::DeletedAt.is_null())
            .order_by_asc(product_supplier::Column::Id)
            .all(&txn)
            .await?;

        txn.commit().await?;
        Ok(ProductWithSuppliers {
            product,
            product_suppliers,
        })
    }
}

impl EntityRepository<supplier::Entity> {
    /// A supplier and the live catalog entries it offers.
    pub async fn get_supplier_with_products(
        &self,
        id: i32,
    ) -> Result<SupplierWithProducts, ServiceError> {
        let txn = self.base.begin_read().await?;

        let supplier = Self::find_live(&txn, id).await?;
        let product_suppliers = supplier
            .find_related(product_supplier::Entity)
            .filter(product_supplier::Column::DeletedAt.is_null())
            .order_by_asc(product_supplier::Column::Id)
            .all(&txn)
            .await?;

        txn.commit().await?;
        Ok(SupplierWithProducts {
            supplier,
            product_suppliers,
        })
    }

    /// A supplier and its live contact, resolved through `contacts.supplier_id`.
    pub async fn get_supplier_with_contact(
        &self,
        id: i32,
    ) -> Result<SupplierWithContact, ServiceError> {
        let txn = self.base.begin_read().await?;

        let supplier = Self::find_live(&txn, id).await?;
        let contact = supplier
            .find_related(contact::Entity)
            .filter(contact::Column::DeletedAt.is_null())
            .order_by_asc(contact::Column::Id)
            .one(&txn)
            .await?;

        txn.commit().await?;
        Ok(SupplierWithContact { supplier, contact })
    }
}
