//! API exposure
//!
//! An exposure consumes a `ServerHost` and produces a Router for one
//! protocol. REST is the only one the resort API serves.

pub mod rest;

pub use rest::RestExposure;
