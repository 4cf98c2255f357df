use metrics::counter;
use sea_orm::{DatabaseConnection, IntoActiveModel};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::entities::StoreEntity;
use crate::errors::ServiceError;
use crate::repositories::EntityRepository;

/// Service for one store entity. Adds spans, logging and counters on top of
/// the repository.
pub struct RecordService<E> {
    pub(crate) repository: EntityRepository<E>,
}

impl<E> Clone for RecordService<E> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
        }
    }
}

pub(crate) fn record_outcome<T>(
    entity: &'static str,
    operation: &'static str,
    result: &Result<T, ServiceError>,
) {
    match result {
        Ok(_) => counter!("store_records.operations", 1, "entity" => entity, "operation" => operation),
        Err(ServiceError::NotFound(msg)) => {
            debug!(entity, operation, "{}", msg);
            counter!("store_records.not_found", 1, "entity" => entity, "operation" => operation);
        }
        Err(err) => {
            warn!(entity, operation, error = %err, "record operation failed");
            counter!("store_records.failures", 1, "entity" => entity, "operation" => operation);
        }
    }
}

impl<E: StoreEntity> RecordService<E> {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            repository: EntityRepository::new(db),
        }
    }

    #[instrument(skip(self), fields(entity = E::PLURAL))]
    pub async fn get_by_id(&self, id: i32) -> Result<E::Model, ServiceError> {
        let result = self.repository.get_by_id(id).await;
        record_outcome(E::PLURAL, "get", &result);
        result
    }

    #[instrument(skip(self), fields(entity = E::PLURAL))]
    pub async fn get_all(&self) -> Result<Vec<E::Model>, ServiceError> {
        let result = self.repository.get_all().await;
        if let Ok(records) = &result {
            debug!(count = records.len(), "listed records");
        }
        record_outcome(E::PLURAL, "list", &result);
        result
    }

    #[instrument(skip(self, input), fields(entity = E::PLURAL))]
    pub async fn create(&self, input: E::Input) -> Result<E::Model, ServiceError>
    where
        E::Model: IntoActiveModel<E::ActiveModel>,
        E::ActiveModel: Send,
    {
        let result = self.repository.create(input).await;
        if let Ok(model) = &result {
            info!(id = E::record_id(model), "{} created", E::NAME);
        }
        record_outcome(E::PLURAL, "create", &result);
        result
    }

    #[instrument(skip(self, input), fields(entity = E::PLURAL))]
    pub async fn update(&self, id: i32, input: E::Input) -> Result<E::Model, ServiceError>
    where
        E::ActiveModel: Send,
    {
        let result = self.repository.update(id, input).await;
        if result.is_ok() {
            info!(id, "{} updated", E::NAME);
        }
        record_outcome(E::PLURAL, "update", &result);
        result
    }

    #[instrument(skip(self), fields(entity = E::PLURAL))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = self.repository.delete(id).await;
        if result.is_ok() {
            info!(id, "{} deleted", E::NAME);
        }
        record_outcome(E::PLURAL, "delete", &result);
        result
    }

    #[instrument(skip(self), fields(entity = E::PLURAL))]
    pub async fn delete_all(&self, ids: &[i32]) -> Result<u64, ServiceError> {
        let result = self.repository.delete_all(ids).await;
        if let Ok(deleted) = &result {
            info!(deleted, "{} deleted", E::PLURAL);
        }
        record_outcome(E::PLURAL, "delete_all", &result);
        result
    }
}
