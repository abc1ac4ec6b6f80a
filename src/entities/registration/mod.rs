//! Registrations: leads filed against a property or a tourism package

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod property_handlers;
pub mod workflow;

pub use descriptor::{PropertyRegistrationDescriptor, RegistrationDescriptor};
pub use model::{Registration, RegistrationStatus, RegistrationTarget};
pub use workflow::{Populated, PropertySummary, RegistrationService};
