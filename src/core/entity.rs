//! Entity traits defining the core abstraction for all stored documents

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

/// Base trait for every stored document.
///
/// All documents have:
/// - id: Unique identifier (UUID v4)
/// - createdAt: set once on creation
/// - updatedAt: bumped on every write, never on read
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name, used as collection name (e.g., "bookings")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "booking")
    fn resource_name_singular() -> &'static str;

    /// Human label used in messages ("Booking not found")
    fn label() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Record a write
    fn touch(&mut self);
}

/// Trait for documents that can be filtered and sorted by field.
pub trait Data: Entity {
    /// Fields that list operations may filter on
    fn indexed_fields() -> &'static [&'static str];

    /// Get the value of a specific field by its wire name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Mutable access to an id-list field, for back-reference maintenance
    fn references_mut(&mut self, _field: &str) -> Option<&mut Vec<Uuid>> {
        None
    }
}

/// Documents carrying a flat status enum.
///
/// There is no transition graph: any declared value may follow any other.
pub trait HasStatus {
    type Status: Copy + FromStr + Display + Send + Sync;

    /// Every accepted wire value, in declaration order
    fn allowed_statuses() -> &'static [&'static str];

    fn status(&self) -> Self::Status;

    fn set_status(&mut self, status: Self::Status);
}
