//! Entity registry: collects route descriptors and merges their routers

use axum::Router;
use std::collections::BTreeMap;

/// Describes how to mount one resource family
///
/// Each entity module (bookings, investments, registrations, ...) provides a
/// descriptor owning the state its handlers need.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "booking")
    fn entity_type(&self) -> &str;

    /// The path segment the routes live under (e.g., "bookings")
    fn plural(&self) -> &str;

    /// Build the routes, with state already applied
    fn build_routes(&self) -> Router;
}

/// Registry for all mounted resource families
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor; a second one with the same type replaces the first
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        if self.descriptors.insert(entity_type, descriptor).is_some() {
            tracing::warn!("entity descriptor registered twice, keeping the last one");
        }
    }

    /// Merge every descriptor's routes into one router
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                tracing::debug!(
                    entity = descriptor.entity_type(),
                    path = %format!("/{}", descriptor.plural()),
                    "mounting routes"
                );
                router.merge(descriptor.build_routes())
            })
    }

    /// Registered entity types, sorted
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }
}
