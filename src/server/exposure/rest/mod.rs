//! REST API exposure
//!
//! Consumes a [`ServerHost`] and produces an Axum `Router`: entity routes
//! under `/api`, health probes and a greeting at the root, and an envelope
//! for unknown paths.

use super::super::host::ServerHost;
use crate::core::error::ErrorResponse;
use anyhow::Result;
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;

/// Prefix under which every entity route is mounted
pub const API_PREFIX: &str = "/api";

pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// `custom_routes` are mounted under `/api` next to the entity routes.
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let mut api = host.entity_registry.build_routes();
        for custom_router in custom_routes {
            api = api.merge(custom_router);
        }

        Ok(Router::new()
            .route("/", get(Self::greeting))
            .merge(Self::health_routes())
            .nest(API_PREFIX, api)
            .fallback(Self::not_found))
    }

    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    async fn greeting() -> &'static str {
        "Hello World!"
    }

    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "resort-api"
        }))
    }

    async fn not_found(uri: Uri) -> impl IntoResponse {
        tracing::debug!(path = %uri.path(), "no route");
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                success: false,
                code: "ROUTE_NOT_FOUND".to_string(),
                message: format!("Route {} not found", uri.path()),
                error: None,
                details: None,
            }),
        )
    }
}
