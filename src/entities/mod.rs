//! Resort documents, their HTTP handlers and route descriptors
//!
//! Each entity lives in its own module with the same layout:
//!
//! - `model.rs`: the document, its status enum and validation rules
//! - `handlers.rs`: axum handlers over a per-entity AppState
//! - `descriptor.rs`: an [`EntityDescriptor`](crate::server::EntityDescriptor)
//!   that mounts the routes

#[macro_use]
pub mod macros;

pub mod booking;
pub mod dashboard;
pub mod form_response;
pub mod investment;
pub mod registration;
pub mod tourism;
pub mod user;
