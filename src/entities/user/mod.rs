//! Staff accounts and sign-in

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::UserDescriptor;
pub use model::{AuthSession, User, UserProfile, UserRole};
