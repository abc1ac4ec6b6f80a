//! Generic CRUD operations shared by the resource handlers
//!
//! `Resource<T>` lifts the `anyhow` results of a [`DataService`] into typed
//! [`ApiError`]s and resolves path ids, so handlers only shape responses.

use crate::core::entity::{Data, HasStatus};
use crate::core::error::{ApiResult, EntityError, StorageError, ValidationError};
use crate::core::extractors::parse_id;
use crate::core::query::{Filter, Page, PaginationMeta};
use crate::core::service::DataService;
use crate::core::validation::ValidatableEntity;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

pub struct Resource<T: Data> {
    service: Arc<dyn DataService<T>>,
}

impl<T: Data> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<T: Data + ValidatableEntity> Resource<T> {
    pub fn new(service: Arc<dyn DataService<T>>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &Arc<dyn DataService<T>> {
        &self.service
    }

    pub async fn create(&self, entity: T) -> ApiResult<T> {
        let created = self
            .service
            .create(entity)
            .await
            .map_err(|e| StorageError::failed("creating", T::label(), e))?;

        tracing::info!(entity = T::resource_name_singular(), id = %created.id(), "created");
        Ok(created)
    }

    /// Look up by id, `None` when absent
    pub async fn get(&self, id: &Uuid) -> ApiResult<Option<T>> {
        Ok(self
            .service
            .get(id)
            .await
            .map_err(|e| StorageError::failed("fetching", T::label(), e))?)
    }

    /// Look up by raw path id, `NotFound` when it does not resolve
    pub async fn find(&self, raw_id: &str) -> ApiResult<T> {
        let id = parse_id::<T>(raw_id)?;
        self.get(&id)
            .await?
            .ok_or_else(|| EntityError::not_found(T::label(), id).into())
    }

    pub async fn list(&self, filter: &Filter) -> ApiResult<Vec<T>> {
        Ok(self
            .service
            .list(filter)
            .await
            .map_err(|e| StorageError::failed("fetching", T::resource_name(), e))?)
    }

    pub async fn page(&self, filter: &Filter, page: Page) -> ApiResult<(Vec<T>, PaginationMeta)> {
        let (items, total) = self
            .service
            .page(filter, &page)
            .await
            .map_err(|e| StorageError::failed("fetching", T::resource_name(), e))?;

        Ok((items, PaginationMeta::new(page, total)))
    }

    pub async fn count(&self, filter: &Filter) -> ApiResult<usize> {
        Ok(self
            .service
            .count(filter)
            .await
            .map_err(|e| StorageError::failed("counting", T::resource_name(), e))?)
    }

    /// Partial update: merge, re-validate, persist
    pub async fn update(&self, raw_id: &str, patch: Value) -> ApiResult<T> {
        let current = self.find(raw_id).await?;
        let updated = current.merged_with(patch)?;
        self.replace(updated).await
    }

    /// Persist an already-validated document under its own id
    pub async fn replace(&self, entity: T) -> ApiResult<T> {
        let id = entity.id();
        self.service
            .update(&id, entity)
            .await
            .map_err(|e| StorageError::failed("updating", T::label(), e))?
            .ok_or_else(|| EntityError::not_found(T::label(), id).into())
    }

    pub async fn delete(&self, raw_id: &str) -> ApiResult<T> {
        let id = parse_id::<T>(raw_id)?;
        let removed = self
            .service
            .delete(&id)
            .await
            .map_err(|e| StorageError::failed("deleting", T::label(), e))?
            .ok_or_else(|| EntityError::not_found(T::label(), id))?;

        tracing::info!(entity = T::resource_name_singular(), %id, "deleted");
        Ok(removed)
    }
}

impl<T: Data + ValidatableEntity + HasStatus> Resource<T> {
    /// Set the status field
    ///
    /// The value is checked against the entity's enum before the id is even
    /// looked up, so a rejected request never touches the store.
    pub async fn update_status(&self, raw_id: &str, raw_status: Option<&str>) -> ApiResult<T> {
        let status = parse_status::<T>(raw_status)?;

        let mut current = self.find(raw_id).await?;
        current.set_status(status);
        current.touch();
        self.replace(current).await
    }
}

/// Parse a status wire value for `T`
pub fn parse_status<T: HasStatus>(raw: Option<&str>) -> Result<T::Status, ValidationError> {
    let raw = raw.unwrap_or_default();
    raw.parse::<T::Status>()
        .map_err(|_| ValidationError::InvalidStatus {
            value: raw.to_string(),
            allowed: T::allowed_statuses(),
        })
}

/// Status value from a `{ "status": ... }` body
pub fn status_from_body(body: &Value) -> Option<&str> {
    body.get("status").and_then(Value::as_str)
}
