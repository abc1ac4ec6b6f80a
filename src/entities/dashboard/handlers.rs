//! Dashboard HTTP handlers

use super::stats::{DashboardService, DashboardStats};
use crate::core::envelope::Envelope;
use crate::core::error::ApiResult;
use axum::extract::State;

pub async fn get_dashboard_stats(
    State(service): State<DashboardService>,
) -> ApiResult<Envelope<DashboardStats>> {
    let stats = service.stats().await?;
    Ok(Envelope::ok(stats).with_message("Dashboard statistics retrieved successfully"))
}
