//! In-memory implementation of DataService for testing and development

use crate::core::query::{Filter, Page};
use crate::core::{Data, DataService, ReferenceList};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory data service implementation
///
/// Documents are kept in insertion order, which breaks `createdAt` ties in
/// favour of the most recently inserted document. Uses RwLock for
/// thread-safe access.
#[derive(Clone)]
pub struct InMemoryDataService<T> {
    entities: Arc<RwLock<IndexMap<Uuid, T>>>,
}

impl<T> InMemoryDataService<T> {
    /// Create a new, empty in-memory data service
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(IndexMap::new())),
        }
    }
}

impl<T> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Data> InMemoryDataService<T> {
    fn matching(&self, filter: &Filter) -> Result<Vec<T>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut items: Vec<T> = entities
            .values()
            .rev()
            .filter(|entity| filter.matches(*entity))
            .cloned()
            .collect();
        items.sort_by(|a, b| filter.compare(a, b));

        Ok(items)
    }
}

#[async_trait]
impl<T: Data> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if entities.contains_key(&entity.id()) {
            return Err(anyhow!("Duplicate id {}", entity.id()));
        }
        entities.insert(entity.id(), entity.clone());

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(entities.get(id).cloned())
    }

    async fn list(&self, filter: &Filter) -> Result<Vec<T>> {
        let mut items = self.matching(filter)?;
        if let Some(limit) = filter.limit {
            items.truncate(limit);
        }
        Ok(items)
    }

    async fn page(&self, filter: &Filter, page: &Page) -> Result<(Vec<T>, usize)> {
        let items = self.matching(filter)?;
        let total = items.len();
        let slice = items
            .into_iter()
            .skip(page.skip())
            .take(page.limit)
            .collect();

        Ok((slice, total))
    }

    async fn count(&self, filter: &Filter) -> Result<usize> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(entities.values().filter(|e| filter.matches(*e)).count())
    }

    async fn update(&self, id: &Uuid, entity: T) -> Result<Option<T>> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        match entities.get_mut(id) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(Some(entity))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<T>> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(entities.shift_remove(id))
    }
}

#[async_trait]
impl<T: Data> ReferenceList for InMemoryDataService<T> {
    async fn push_reference(&self, owner: &Uuid, field: &str, value: Uuid) -> Result<bool> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(entity) = entities.get_mut(owner) else {
            return Ok(false);
        };
        let list = entity
            .references_mut(field)
            .ok_or_else(|| anyhow!("'{}' is not a reference list", field))?;
        list.push(value);
        entity.touch();

        Ok(true)
    }

    async fn pull_reference(&self, owner: &Uuid, field: &str, value: Uuid) -> Result<bool> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(entity) = entities.get_mut(owner) else {
            return Ok(false);
        };
        let list = entity
            .references_mut(field)
            .ok_or_else(|| anyhow!("'{}' is not a reference list", field))?;
        list.retain(|id| *id != value);
        entity.touch();

        Ok(true)
    }
}
