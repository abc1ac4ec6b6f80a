//! Staff dashboard statistics

pub mod descriptor;
pub mod handlers;
pub mod stats;

pub use descriptor::DashboardDescriptor;
pub use stats::{DashboardService, DashboardStats};
