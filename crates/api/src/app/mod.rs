//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the shared inventory service behind one lock
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::{AppServices, SharedStore};

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(inventory: stockroom_infra::InventoryService<SharedStore>) -> Router {
    let services = Arc::new(AppServices::new(inventory));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
