//! Route descriptor for the dashboard

use super::handlers::get_dashboard_stats;
use super::stats::DashboardService;
use crate::server::entity_registry::EntityDescriptor;
use axum::{Router, routing::get};

/// Read-only aggregate over the other collections, mounted at `/dashboard`
pub struct DashboardDescriptor {
    pub service: DashboardService,
}

impl DashboardDescriptor {
    pub fn new(service: DashboardService) -> Self {
        Self { service }
    }
}

impl EntityDescriptor for DashboardDescriptor {
    fn entity_type(&self) -> &str {
        "dashboard"
    }

    fn plural(&self) -> &str {
        "dashboard"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/dashboard/stats", get(get_dashboard_stats))
            .with_state(self.service.clone())
    }
}
