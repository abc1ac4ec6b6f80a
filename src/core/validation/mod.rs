//! Validation and filtering system
//!
//! Each entity declares its rules once through [`EntityValidationConfig`];
//! the same rules guard creation and every partial update.

pub mod config;
pub mod extractor;
pub mod filters;
pub mod validators;

pub use config::EntityValidationConfig;
pub use extractor::{ValidatableEntity, Validated};
