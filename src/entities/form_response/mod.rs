//! Form responses: enquiries from the package and property pages

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::FormResponseDescriptor;
pub use model::{FormResponse, FormResponseStatus, FormTarget};
