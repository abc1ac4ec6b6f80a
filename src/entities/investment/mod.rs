//! Investments: property listings and their registration back-references

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::InvestmentDescriptor;
pub use model::{Investment, InvestmentStatus, REGISTRATIONS_FIELD};
