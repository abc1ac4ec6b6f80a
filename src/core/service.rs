//! Service traits implemented by every storage backend

use crate::core::entity::Data;
use crate::core::query::{Filter, Page};
use crate::entities::investment::Investment;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for managing stored documents
///
/// Implementations provide CRUD operations for a specific entity type.
/// Handlers are agnostic to the underlying storage mechanism.
#[async_trait]
pub trait DataService<T: Data>: Send + Sync {
    /// Insert a new document
    async fn create(&self, entity: T) -> Result<T>;

    /// Get a document by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// List documents matching the filter, in filter order
    async fn list(&self, filter: &Filter) -> Result<Vec<T>>;

    /// One page of matching documents plus the total match count
    async fn page(&self, filter: &Filter, page: &Page) -> Result<(Vec<T>, usize)>;

    /// Count documents matching the filter
    async fn count(&self, filter: &Filter) -> Result<usize>;

    /// Replace a stored document; `None` when the id is unknown
    async fn update(&self, id: &Uuid, entity: T) -> Result<Option<T>>;

    /// Remove a document and hand it back; `None` when the id is unknown
    async fn delete(&self, id: &Uuid) -> Result<Option<T>>;
}

/// Single-document append/remove on an id-list field
///
/// Each call is atomic on its document, so concurrent appends to the same
/// owner are never lost. Both return `false` when the owner does not exist.
#[async_trait]
pub trait ReferenceList: Send + Sync {
    async fn push_reference(&self, owner: &Uuid, field: &str, value: Uuid) -> Result<bool>;

    async fn pull_reference(&self, owner: &Uuid, field: &str, value: Uuid) -> Result<bool>;
}

/// Investment storage: CRUD plus the `registrations` back-reference
pub trait InvestmentStore: DataService<Investment> + ReferenceList {}

impl<S> InvestmentStore for S where S: DataService<Investment> + ReferenceList {}
