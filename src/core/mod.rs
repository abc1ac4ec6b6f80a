//! Core module containing the traits and types shared by every resource

pub mod entity;
pub mod envelope;
pub mod error;
pub mod extractors;
pub mod field;
pub mod query;
pub mod resource;
pub mod service;
pub mod validation;

pub use entity::{Data, Entity, HasStatus};
pub use envelope::Envelope;
pub use error::{ApiError, ApiResult};
pub use field::FieldValue;
pub use query::{Filter, Page, PaginationMeta};
pub use service::{DataService, InvestmentStore, ReferenceList};
