//! Entity descriptor for FormResponse

use super::handlers::{
    FormResponseAppState, create_form_response, delete_form_response, get_form_response,
    list_form_responses, update_form_response_status,
};
use super::model::FormResponse;
use crate::core::resource::Resource;
use crate::entities::investment::Investment;
use crate::entities::tourism::TourismPackage;
use crate::server::entity_registry::EntityDescriptor;
use axum::{
    Router,
    routing::{get, patch},
};

/// Descriptor for the FormResponse entity, mounted at `/form-responses`
pub struct FormResponseDescriptor {
    pub responses: Resource<FormResponse>,
    pub investments: Resource<Investment>,
    pub packages: Resource<TourismPackage>,
}

impl FormResponseDescriptor {
    pub fn new(
        responses: Resource<FormResponse>,
        investments: Resource<Investment>,
        packages: Resource<TourismPackage>,
    ) -> Self {
        Self {
            responses,
            investments,
            packages,
        }
    }
}

impl EntityDescriptor for FormResponseDescriptor {
    fn entity_type(&self) -> &str {
        "form_response"
    }

    fn plural(&self) -> &str {
        "form-responses"
    }

    fn build_routes(&self) -> Router {
        let state = FormResponseAppState {
            responses: self.responses.clone(),
            investments: self.investments.clone(),
            packages: self.packages.clone(),
        };

        Router::new()
            .route(
                "/form-responses",
                get(list_form_responses).post(create_form_response),
            )
            .route(
                "/form-responses/{id}",
                get(get_form_response).delete(delete_form_response),
            )
            .route(
                "/form-responses/{id}/status",
                patch(update_form_response_status),
            )
            .with_state(state)
    }
}
