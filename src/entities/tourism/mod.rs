//! Tourism packages: the holiday, wedding and retreat catalogue

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::TourismDescriptor;
pub use model::{PackageCategory, PackageStatus, TourismPackage};
