//! # Resort API
//!
//! REST backend for a luxury resort and real-estate brand: property listings,
//! tourism packages, bookings, lead registrations and a staff dashboard.
//!
//! ## Features
//!
//! - **Typed resources**: every collection is a plain Rust struct validated on the way in
//! - **Uniform envelope**: all responses are `{success, message, data, error}`
//! - **Discriminated leads**: registrations and form responses are sum types keyed by `type`
//! - **Back-references**: investments track the registrations filed against them
//! - **Pluggable storage**: in-memory by default, MongoDB behind `mongodb_backend`
//! - **Bearer auth**: bcrypt password hashing and signed tokens for staff sign-in
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use resort::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!     let addr = config.listen_addr();
//!     let host = ServerHost::connect(config).await?;
//!
//!     ServerBuilder::new(host).serve(&addr).await
//! }
//! ```

pub mod auth;
pub mod config;
pub mod core;
pub mod entities;
pub mod seed;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::{Data, Entity, HasStatus},
        envelope::Envelope,
        error::{ApiError, ApiResult, EntityError, StorageError, ValidationError},
        field::FieldValue,
        query::{Filter, Page, PaginationMeta},
        service::{DataService, InvestmentStore, ReferenceList},
        validation::ValidatableEntity,
    };

    // === Entities ===
    pub use crate::entities::{
        booking::Booking,
        form_response::FormResponse,
        investment::Investment,
        registration::Registration,
        tourism::TourismPackage,
        user::User,
    };

    // === Storage ===
    pub use crate::storage::InMemoryDataService;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoDataService;

    // === Config ===
    pub use crate::config::{AppConfig, StorageBackend};

    // === Server ===
    pub use crate::server::{EntityDescriptor, EntityRegistry, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
