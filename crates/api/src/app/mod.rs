//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and the shared query service
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: query-string DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;
use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, Extension, Router};
use tower::ServiceBuilder;

use crate::config::ApiConfig;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &ApiConfig) -> Result<Router, services::ServicesError> {
    let services = Arc::new(services::build_services(&config.store).await?);
    Ok(router(services, config.request_timeout))
}

/// Router over already-built services.
pub fn router(services: Arc<AppServices>, request_timeout: Duration) -> Router {
    routes::router().layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(errors::middleware_error_to_response))
            .timeout(request_timeout)
            .layer(Extension(services)),
    )
}

pub use services::AppServices;
