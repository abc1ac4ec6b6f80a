//! HTTP server assembly
//!
//! - [`ServerHost`]: stores, resources and entity descriptors
//! - [`EntityRegistry`]: collects descriptors and merges their routes
//! - [`ServerBuilder`]: layers CORS, tracing and panic recovery, then serves

pub mod builder;
pub mod entity_registry;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use exposure::RestExposure;
pub use host::{ServerHost, Stores};
