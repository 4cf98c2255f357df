use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Select, TransactionTrait,
};
use std::{collections::BTreeSet, fmt, marker::PhantomData, sync::Arc};

use crate::entities::{
    contact, customer, order, order_product_supplier, product, product_supplier, supplier,
    ChildRef, ParentRef, StoreEntity,
};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

/// Soft-delete aware CRUD over one entity type.
///
/// Reads never return rows with `deleted_at` set. Deletes only stamp
/// `deleted_at`; nothing is physically removed.
pub struct EntityRepository<E> {
    pub(crate) base: BaseRepository,
    _entity: PhantomData<E>,
}

impl<E> Clone for EntityRepository<E> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> fmt::Debug for EntityRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRepository")
            .field("entity", &std::any::type_name::<E>())
            .finish()
    }
}

impl<E: StoreEntity> EntityRepository<E> {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
            _entity: PhantomData,
        }
    }

    /// Base query over live rows.
    pub(crate) fn live() -> Select<E> {
        E::find().filter(E::deleted_at_column().is_null())
    }

    pub(crate) async fn find_live<C: ConnectionTrait>(
        conn: &C,
        id: i32,
    ) -> Result<E::Model, ServiceError> {
        Self::live()
            .filter(E::id_column().eq(id))
            .one(conn)
            .await?
            .ok_or_else(|| ServiceError::not_found(E::NAME, id))
    }

    /// Find a live record by id
    pub async fn get_by_id(&self, id: i32) -> Result<E::Model, ServiceError> {
        Self::find_live(self.base.get_db(), id).await
    }

    /// All live records, oldest id first
    pub async fn get_all(&self) -> Result<Vec<E::Model>, ServiceError> {
        Ok(Self::live()
            .order_by_asc(E::id_column())
            .all(self.base.get_db())
            .await?)
    }

    /// Inserts one record. Id and timestamps are assigned here.
    pub async fn create(&self, input: E::Input) -> Result<E::Model, ServiceError>
    where
        E::Model: IntoActiveModel<E::ActiveModel>,
        E::ActiveModel: Send,
    {
        let parents = E::parents(&input);
        let now = Utc::now();
        let mut draft = E::draft(input);
        draft.set(E::created_at_column(), now.into());
        draft.set(E::updated_at_column(), now.into());

        let txn = self.base.get_db().begin().await?;
        ensure_parents_live(&txn, &parents).await?;
        let model = draft.insert(&txn).await?;
        txn.commit().await?;

        Ok(model)
    }

    /// Overwrites every caller-supplied field of a live record.
    ///
    /// `created_at` is kept and `updated_at` refreshed. Never inserts.
    pub async fn update(&self, id: i32, input: E::Input) -> Result<E::Model, ServiceError>
    where
        E::ActiveModel: Send,
    {
        let parents = E::parents(&input);
        let mut draft = E::draft(input);
        draft.set(E::updated_at_column(), Utc::now().into());

        let txn = self.base.get_db().begin().await?;
        Self::find_live(&txn, id).await?;
        ensure_parents_live(&txn, &parents).await?;

        let result = E::update_many()
            .set(draft)
            .filter(E::id_column().eq(id))
            .filter(E::deleted_at_column().is_null())
            .exec(&txn)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found(E::NAME, id));
        }

        let model = Self::find_live(&txn, id).await?;
        txn.commit().await?;
        Ok(model)
    }

    /// Soft-deletes one record.
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.delete_all(&[id]).await.map(|_| ())
    }

    /// Soft-deletes every record in `ids`, all or nothing.
    ///
    /// Duplicates are collapsed and an empty set is a no-op. If any id does not
    /// name a live record nothing is deleted and `NotFound` lists the missing ids.
    /// If a live record elsewhere still references one of them nothing is
    /// deleted and `StillReferenced` names it. Returns the number of records deleted.
    pub async fn delete_all(&self, ids: &[i32]) -> Result<u64, ServiceError> {
        let ids: BTreeSet<i32> = ids.iter().copied().collect();
        if ids.is_empty() {
            return Ok(0);
        }

        let txn = self.base.get_db().begin().await?;

        let live: BTreeSet<i32> = Self::live()
            .select_only()
            .column(E::id_column())
            .filter(E::id_column().is_in(ids.iter().copied()))
            .into_tuple::<i32>()
            .all(&txn)
            .await?
            .into_iter()
            .collect();
        let missing: Vec<i32> = ids.difference(&live).copied().collect();
        if !missing.is_empty() {
            txn.rollback().await?;
            return Err(missing_ids_error::<E>(&missing));
        }

        if let Err(err) = ensure_no_live_children::<E, _>(&txn, &ids).await {
            txn.rollback().await?;
            return Err(err);
        }

        let now = Utc::now();
        let result = E::update_many()
            .col_expr(E::deleted_at_column(), Expr::value(now))
            .col_expr(E::updated_at_column(), Expr::value(now))
            .filter(E::id_column().is_in(ids.iter().copied()))
            .filter(E::deleted_at_column().is_null())
            .exec(&txn)
            .await?;

        // A concurrent delete can land between the check and the update.
        if result.rows_affected != ids.len() as u64 {
            txn.rollback().await?;
            return Err(ServiceError::NotFound(format!(
                "{} changed while deleting; nothing was deleted",
                E::PLURAL
            )));
        }

        txn.commit().await?;
        Ok(result.rows_affected)
    }
}

fn missing_ids_error<E: StoreEntity>(missing: &[i32]) -> ServiceError {
    match missing {
        [id] => ServiceError::not_found(E::NAME, *id),
        _ => ServiceError::NotFound(format!(
            "{} with ids [{}] not found",
            E::PLURAL,
            missing
                .iter()
                .map(i32::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        )),
    }
}

async fn is_live<E: StoreEntity, C: ConnectionTrait>(conn: &C, id: i32) -> Result<bool, DbErr> {
    let found = EntityRepository::<E>::live()
        .select_only()
        .column(E::id_column())
        .filter(E::id_column().eq(id))
        .into_tuple::<i32>()
        .one(conn)
        .await?;
    Ok(found.is_some())
}

/// Fails with `InvalidReference` naming the first parent that is missing or soft-deleted.
pub(crate) async fn ensure_parents_live<C: ConnectionTrait>(
    conn: &C,
    parents: &[ParentRef],
) -> Result<(), ServiceError> {
    for parent in parents {
        let (name, id, live) = match *parent {
            ParentRef::Customer(id) => (
                customer::Entity::NAME,
                id,
                is_live::<customer::Entity, _>(conn, id).await?,
            ),
            ParentRef::Supplier(id) => (
                supplier::Entity::NAME,
                id,
                is_live::<supplier::Entity, _>(conn, id).await?,
            ),
            ParentRef::Product(id) => (
                product::Entity::NAME,
                id,
                is_live::<product::Entity, _>(conn, id).await?,
            ),
            ParentRef::Order(id) => (
                order::Entity::NAME,
                id,
                is_live::<order::Entity, _>(conn, id).await?,
            ),
            ParentRef::ProductSupplier(id) => (
                product_supplier::Entity::NAME,
                id,
                is_live::<product_supplier::Entity, _>(conn, id).await?,
            ),
        };

        if !live {
            return Err(ServiceError::InvalidReference(format!(
                "{} with id {} does not exist",
                name, id
            )));
        }
    }
    Ok(())
}

async fn first_live_referrer<E: StoreEntity, C: ConnectionTrait>(
    conn: &C,
    fk: E::Column,
    ids: &BTreeSet<i32>,
) -> Result<Option<i32>, DbErr> {
    EntityRepository::<E>::live()
        .select_only()
        .column(E::id_column())
        .filter(fk.is_in(ids.iter().copied()))
        .order_by_asc(E::id_column())
        .into_tuple::<i32>()
        .one(conn)
        .await
}

/// Fails with `StillReferenced` when a live row in a child table points at one of `ids`.
async fn ensure_no_live_children<E: StoreEntity, C: ConnectionTrait>(
    conn: &C,
    ids: &BTreeSet<i32>,
) -> Result<(), ServiceError> {
    for child in E::children() {
        let (name, referrer) = match *child {
            ChildRef::OrdersByCustomer => (
                order::Entity::NAME,
                first_live_referrer::<order::Entity, _>(conn, order::Column::CustomerId, ids)
                    .await?,
            ),
            ChildRef::ContactsByCustomer => (
                contact::Entity::NAME,
                first_live_referrer::<contact::Entity, _>(conn, contact::Column::CustomerId, ids)
                    .await?,
            ),
            ChildRef::ContactsBySupplier => (
                contact::Entity::NAME,
                first_live_referrer::<contact::Entity, _>(conn, contact::Column::SupplierId, ids)
                    .await?,
            ),
            ChildRef::ProductSuppliersByProduct => (
                product_supplier::Entity::NAME,
                first_live_referrer::<product_supplier::Entity, _>(
                    conn,
                    product_supplier::Column::ProductId,
                    ids,
                )
                .await?,
            ),
            ChildRef::ProductSuppliersBySupplier => (
                product_supplier::Entity::NAME,
                first_live_referrer::<product_supplier::Entity, _>(
                    conn,
                    product_supplier::Column::SupplierId,
                    ids,
                )
                .await?,
            ),
            ChildRef::OrderProductsByOrder => (
                order_product_supplier::Entity::NAME,
                first_live_referrer::<order_product_supplier::Entity, _>(
                    conn,
                    order_product_supplier::Column::OrderId,
                    ids,
                )
                .await?,
            ),
            ChildRef::OrderProductsByProductSupplier => (
                order_product_supplier::Entity::NAME,
                first_live_referrer::<order_product_supplier::Entity, _>(
                    conn,
                    order_product_supplier::Column::ProductSupplierId,
                    ids,
                )
                .await?,
            ),
        };

        if let Some(referrer) = referrer {
            return Err(ServiceError::StillReferenced(format!(
                "{} cannot be deleted while {} with id {} references them",
                E::PLURAL,
                name,
                referrer
            )));
        }
    }
    Ok(())
}
