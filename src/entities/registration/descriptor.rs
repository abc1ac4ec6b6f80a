//! Entity descriptors for Registration
//!
//! Two route families share one [`RegistrationService`]: the general
//! `/registrations` API and the investment-only `/property-registrations`.

use super::handlers::{
    RegistrationAppState, create_registration, delete_registration, get_registration,
    list_registrations, update_registration_status,
};
use super::property_handlers::{
    create_property_registration, delete_property_registration, get_property_registration,
    list_property_registrations, list_registrations_by_property, update_property_registration,
    update_property_registration_status,
};
use super::workflow::RegistrationService;
use crate::server::entity_registry::EntityDescriptor;
use axum::{
    Router,
    routing::{get, patch},
};

/// Descriptor for `/registrations`
pub struct RegistrationDescriptor {
    pub service: RegistrationService,
}

impl RegistrationDescriptor {
    pub fn new(service: RegistrationService) -> Self {
        Self { service }
    }
}

impl EntityDescriptor for RegistrationDescriptor {
    fn entity_type(&self) -> &str {
        "registration"
    }

    fn plural(&self) -> &str {
        "registrations"
    }

    fn build_routes(&self) -> Router {
        let state = RegistrationAppState {
            service: self.service.clone(),
        };

        Router::new()
            .route(
                "/registrations",
                get(list_registrations).post(create_registration),
            )
            .route(
                "/registrations/{id}",
                get(get_registration).delete(delete_registration),
            )
            .route(
                "/registrations/{id}/status",
                patch(update_registration_status),
            )
            .with_state(state)
    }
}

/// Descriptor for `/property-registrations`
pub struct PropertyRegistrationDescriptor {
    pub service: RegistrationService,
}

impl PropertyRegistrationDescriptor {
    pub fn new(service: RegistrationService) -> Self {
        Self { service }
    }
}

impl EntityDescriptor for PropertyRegistrationDescriptor {
    fn entity_type(&self) -> &str {
        "property_registration"
    }

    fn plural(&self) -> &str {
        "property-registrations"
    }

    fn build_routes(&self) -> Router {
        let state = RegistrationAppState {
            service: self.service.clone(),
        };

        Router::new()
            .route(
                "/property-registrations",
                get(list_property_registrations).post(create_property_registration),
            )
            .route(
                "/property-registrations/property/{property_id}",
                get(list_registrations_by_property),
            )
            .route(
                "/property-registrations/{id}",
                get(get_property_registration)
                    .put(update_property_registration)
                    .delete(delete_property_registration),
            )
            .route(
                "/property-registrations/{id}/status",
                patch(update_property_registration_status),
            )
            .with_state(state)
    }
}
