//! MongoDB storage backend using the official MongoDB async driver.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! resort-api = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! One collection per entity type, named after `T::resource_name()`
//! ("bookings", "investments", ...).
//!
//! # Serialization strategy
//!
//! Documents are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON. UUIDs and timestamps are therefore stored as
//! strings. `createdAt`/`updatedAt` are rewritten to fixed-width RFC 3339
//! with nanoseconds so that string order matches time order. The `id` field
//! is mapped to MongoDB's `_id` convention.

use crate::core::query::{Filter, Page, SortOrder};
use crate::core::{Data, DataService, ReferenceList};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::IndexOptions;
use mongodb::{Database, IndexModel};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Timestamps that are sorted or range-queried
const TIMESTAMP_FIELDS: &[&str] = &["createdAt", "updatedAt"];

/// RFC 3339 in UTC with exactly nine fractional digits
fn timestamp_key(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn normalize_timestamps(doc: &mut Document) {
    for &field in TIMESTAMP_FIELDS {
        let Ok(raw) = doc.get_str(field) else {
            continue;
        };
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            doc.insert(field, timestamp_key(ts.with_timezone(&Utc)));
        }
    }
}

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document,
/// renaming `id` → `_id`.
fn json_to_document(json: serde_json::Value) -> Result<Document> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }
    normalize_timestamps(&mut doc);

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value, renaming `_id` → `id`.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

/// Convert a UUID to its BSON string representation for queries.
fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

/// Translate a [`Filter`] into a query document
fn filter_to_document(filter: &Filter) -> Document {
    let mut query = Document::new();

    for (field, value) in &filter.equals {
        let field = if field == "id" { "_id" } else { field.as_str() };
        query.insert(field, Bson::String(value.clone()));
    }

    if let Some(since) = filter.created_since {
        query.insert("createdAt", doc! { "$gte": timestamp_key(since) });
    }

    query
}

/// Translate the sort settings into a sort document
fn sort_document(filter: &Filter) -> Document {
    let direction = match filter.order {
        SortOrder::Asc => 1,
        SortOrder::Desc => -1,
    };

    doc! { filter.sort_by.as_str(): direction }
}

// ---------------------------------------------------------------------------
// MongoDataService<T>
// ---------------------------------------------------------------------------

/// Generic data storage service backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use resort::storage::MongoDataService;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let db = client.database("resort");
/// let bookings = MongoDataService::<Booking>::new(db);
/// let booking = bookings.create(booking).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoDataService<T> {
    database: Database,
    _marker: std::marker::PhantomData<T>,
}

impl<T> MongoDataService<T> {
    /// Create a new `MongoDataService` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _marker: std::marker::PhantomData,
        }
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl<T: Data + Serialize + DeserializeOwned> MongoDataService<T> {
    /// Get the MongoDB collection for this entity type.
    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(T::resource_name())
    }

    /// Create a unique index on `field` (e.g. `users.email`)
    pub async fn ensure_unique(&self, field: &str) -> Result<()> {
        let options = IndexOptions::builder().unique(true).build();
        let index = IndexModel::builder()
            .keys(doc! { field: 1 })
            .options(options)
            .build();

        self.collection()
            .create_index(index)
            .await
            .map_err(|e| anyhow!("Failed to create index on {}: {}", field, e))?;

        Ok(())
    }

    fn entity_to_document(entity: &T) -> Result<Document> {
        let json = serde_json::to_value(entity)
            .map_err(|e| anyhow!("Failed to serialize entity: {}", e))?;
        json_to_document(json)
    }

    fn document_to_entity(doc: Document) -> Result<T> {
        let json = document_to_json(doc);
        serde_json::from_value(json)
            .map_err(|e| anyhow!("Failed to deserialize entity from document: {}", e))
    }

    async fn collect(&self, cursor: mongodb::Cursor<Document>) -> Result<Vec<T>> {
        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect entities: {}", e))?;

        docs.into_iter().map(Self::document_to_entity).collect()
    }

    async fn modify_reference(
        &self,
        owner: &Uuid,
        operator: &str,
        field: &str,
        value: Uuid,
    ) -> Result<bool> {
        let now = timestamp_key(Utc::now());
        let update = doc! {
            operator: { field: value.to_string() },
            "$set": { "updatedAt": now },
        };

        let result = self
            .collection()
            .update_one(doc! { "_id": uuid_bson(owner) }, update)
            .await
            .map_err(|e| anyhow!("Failed to update {} on {}: {}", field, owner, e))?;

        Ok(result.matched_count > 0)
    }
}

#[async_trait]
impl<T: Data + Serialize + DeserializeOwned> DataService<T> for MongoDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let doc = Self::entity_to_document(&entity)?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to create entity: {}", e))?;

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to get entity: {}", e))?;

        doc.map(Self::document_to_entity).transpose()
    }

    async fn list(&self, filter: &Filter) -> Result<Vec<T>> {
        let mut find = self
            .collection()
            .find(filter_to_document(filter))
            .sort(sort_document(filter));
        if let Some(limit) = filter.limit {
            find = find.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let cursor = find
            .await
            .map_err(|e| anyhow!("Failed to list entities: {}", e))?;

        self.collect(cursor).await
    }

    async fn page(&self, filter: &Filter, page: &Page) -> Result<(Vec<T>, usize)> {
        let query = filter_to_document(filter);

        let total = self
            .collection()
            .count_documents(query.clone())
            .await
            .map_err(|e| anyhow!("Failed to count entities: {}", e))?;

        let cursor = self
            .collection()
            .find(query)
            .sort(sort_document(filter))
            .skip(page.skip() as u64)
            .limit(i64::try_from(page.limit).unwrap_or(i64::MAX))
            .await
            .map_err(|e| anyhow!("Failed to list entities: {}", e))?;

        Ok((self.collect(cursor).await?, total as usize))
    }

    async fn count(&self, filter: &Filter) -> Result<usize> {
        let total = self
            .collection()
            .count_documents(filter_to_document(filter))
            .await
            .map_err(|e| anyhow!("Failed to count entities: {}", e))?;

        Ok(total as usize)
    }

    async fn update(&self, id: &Uuid, entity: T) -> Result<Option<T>> {
        let doc = Self::entity_to_document(&entity)?;

        let result = self
            .collection()
            .replace_one(doc! { "_id": uuid_bson(id) }, doc)
            .await
            .map_err(|e| anyhow!("Failed to update entity: {}", e))?;

        if result.matched_count == 0 {
            return Ok(None);
        }
        Ok(Some(entity))
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<T>> {
        let removed = self
            .collection()
            .find_one_and_delete(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to delete entity: {}", e))?;

        removed.map(Self::document_to_entity).transpose()
    }
}

#[async_trait]
impl<T: Data + Serialize + DeserializeOwned> ReferenceList for MongoDataService<T> {
    async fn push_reference(&self, owner: &Uuid, field: &str, value: Uuid) -> Result<bool> {
        self.modify_reference(owner, "$push", field, value).await
    }

    async fn pull_reference(&self, owner: &Uuid, field: &str, value: Uuid) -> Result<bool> {
        self.modify_reference(owner, "$pull", field, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn json_to_document_renames_id_to_underscore_id() {
        let input = json!({"id": "abc", "title": "Villa"});
        let doc = json_to_document(input).unwrap();

        assert!(doc.contains_key("_id"));
        assert!(!doc.contains_key("id"));
        assert_eq!(doc.get_str("_id").unwrap(), "abc");
        assert_eq!(doc.get_str("title").unwrap(), "Villa");
    }

    #[test]
    fn json_to_document_non_object_returns_error() {
        let result = json_to_document(json!("string"));
        assert!(result.unwrap_err().to_string().contains("non-object"));
    }

    #[test]
    fn document_to_json_renames_underscore_id_to_id() {
        let json = document_to_json(doc! { "_id": "abc", "status": "pending" });
        assert_eq!(json["id"], "abc");
        assert_eq!(json["status"], "pending");
        assert!(json.get("_id").is_none());
    }

    #[test]
    fn filter_to_document_maps_equality_and_since() {
        let since = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let filter = Filter::new()
            .eq("type", "investment")
            .eq("status", "pending")
            .since(since);

        let query = filter_to_document(&filter);
        assert_eq!(query.get_str("type").unwrap(), "investment");
        assert_eq!(query.get_str("status").unwrap(), "pending");
        assert_eq!(
            query.get_document("createdAt").unwrap().get_str("$gte").unwrap(),
            "2025-03-01T00:00:00.000000000Z"
        );
    }

    #[test]
    fn json_to_document_writes_fixed_width_timestamps() {
        let whole = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        let fractional = whole + chrono::Duration::milliseconds(500);

        let earlier =
            json_to_document(json!({"id": "a", "createdAt": whole, "updatedAt": whole})).unwrap();
        let later = json_to_document(json!({"id": "b", "createdAt": fractional})).unwrap();

        let earlier = earlier.get_str("createdAt").unwrap();
        let later = later.get_str("createdAt").unwrap();
        assert_eq!(earlier, "2025-03-01T10:00:00.000000000Z");
        assert_eq!(later, "2025-03-01T10:00:00.500000000Z");
        assert_eq!(earlier.len(), later.len());
        assert!(earlier < later);
    }

    #[test]
    fn fixed_width_timestamps_read_back() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        let doc = json_to_document(json!({"id": "a", "createdAt": ts})).unwrap();
        let json = document_to_json(doc);
        let parsed: DateTime<Utc> = serde_json::from_value(json["createdAt"].clone()).unwrap();
        assert_eq!(parsed, ts);
    }

    #[test]
    fn filter_to_document_maps_id_field() {
        let query = filter_to_document(&Filter::new().eq("id", "abc"));
        assert_eq!(query.get_str("_id").unwrap(), "abc");
    }

    #[test]
    fn sort_document_follows_order() {
        let desc = sort_document(&Filter::new());
        assert_eq!(desc.get_i32("createdAt").unwrap(), -1);

        let asc = sort_document(&Filter::new().sorted_by("name", SortOrder::Asc));
        assert_eq!(asc.get_i32("name").unwrap(), 1);
    }
}
