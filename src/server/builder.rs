//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::core::error::ErrorResponse;
use anyhow::Result;
use axum::Router;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::any::Any;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builder for the resort HTTP server
///
/// # Example
///
/// ```ignore
/// let host = ServerHost::in_memory(AppConfig::default());
/// let app = ServerBuilder::new(host)
///     .with_custom_routes(Router::new().route("/ping", get(|| async { "pong" })))
///     .build()?;
/// ```
pub struct ServerBuilder {
    host: ServerHost,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new(host: ServerHost) -> Self {
        Self {
            host,
            custom_routes: Vec::new(),
        }
    }

    /// Add routes that don't belong to an entity; they are mounted under `/api`
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final router with CORS, tracing and panic recovery
    pub fn build(self) -> Result<Router> {
        let cors = cors_layer(&self.host.config.frontend_url);
        let host = Arc::new(self.host);
        let app = RestExposure::build_router(host, self.custom_routes)?;

        Ok(app
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(cors)
            .layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Allow the frontend origin, with credentials
fn cors_layer(frontend_url: &str) -> CorsLayer {
    let origin = match HeaderValue::from_str(frontend_url.trim_end_matches('/')) {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(e) => {
            tracing::warn!(frontend_url, error = %e, "unusable FRONTEND_URL, CORS disabled");
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "handler panicked");

    let body = ErrorResponse {
        success: false,
        code: "INTERNAL_ERROR".to_string(),
        message: "Something went wrong!".to_string(),
        error: Some(detail),
        details: None,
    };
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::routing::get;

    #[test]
    fn test_build_in_memory() {
        let host = ServerHost::in_memory(AppConfig::default());
        assert!(ServerBuilder::new(host).build().is_ok());
    }

    #[test]
    fn test_build_with_custom_routes() {
        let host = ServerHost::in_memory(AppConfig::default());
        let result = ServerBuilder::new(host)
            .with_custom_routes(Router::new().route("/ping", get(|| async { "pong" })))
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_panic_renders_envelope() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
