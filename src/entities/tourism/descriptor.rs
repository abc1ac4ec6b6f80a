//! Entity descriptor for TourismPackage

use super::handlers::{
    TourismAppState, create_package, delete_package, get_package, list_packages,
    list_packages_by_category, update_package, update_package_status,
};
use super::model::TourismPackage;
use crate::core::resource::Resource;
use crate::server::entity_registry::EntityDescriptor;
use axum::{
    Router,
    routing::{get, patch},
};

/// Descriptor for the TourismPackage entity, mounted at `/tourism`
pub struct TourismDescriptor {
    pub packages: Resource<TourismPackage>,
}

impl TourismDescriptor {
    pub fn new(packages: Resource<TourismPackage>) -> Self {
        Self { packages }
    }
}

impl EntityDescriptor for TourismDescriptor {
    fn entity_type(&self) -> &str {
        "tourism"
    }

    fn plural(&self) -> &str {
        "tourism"
    }

    fn build_routes(&self) -> Router {
        let state = TourismAppState {
            packages: self.packages.clone(),
        };

        Router::new()
            .route("/tourism", get(list_packages).post(create_package))
            .route("/tourism/category/{category}", get(list_packages_by_category))
            .route(
                "/tourism/{id}",
                get(get_package).put(update_package).delete(delete_package),
            )
            .route("/tourism/{id}/status", patch(update_package_status))
            .with_state(state)
    }
}
