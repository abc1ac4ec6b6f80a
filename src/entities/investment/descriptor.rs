//! Entity descriptor for Investment

use super::handlers::{
    InvestmentAppState, create_investment, delete_investment, get_investment, list_investments,
    update_investment, update_investment_status,
};
use super::model::Investment;
use crate::core::resource::Resource;
use crate::server::entity_registry::EntityDescriptor;
use axum::{
    Router,
    routing::{get, patch},
};

/// Descriptor for the Investment entity
pub struct InvestmentDescriptor {
    pub investments: Resource<Investment>,
}

impl InvestmentDescriptor {
    pub fn new(investments: Resource<Investment>) -> Self {
        Self { investments }
    }
}

impl EntityDescriptor for InvestmentDescriptor {
    fn entity_type(&self) -> &str {
        "investment"
    }

    fn plural(&self) -> &str {
        "investments"
    }

    fn build_routes(&self) -> Router {
        let state = InvestmentAppState {
            investments: self.investments.clone(),
        };

        Router::new()
            .route("/investments", get(list_investments).post(create_investment))
            .route(
                "/investments/{id}",
                get(get_investment)
                    .put(update_investment)
                    .delete(delete_investment),
            )
            .route("/investments/{id}/status", patch(update_investment_status))
            .with_state(state)
    }
}
