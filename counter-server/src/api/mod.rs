//! API route modules
//!
//! # Resources
//!
//! - [`health`] - liveness and version
//! - [`orders`] - order lifecycle, settlement, KOT tickets
//! - [`menu_items`] - menu catalog
//! - [`categories`] - menu categories
//! - [`tables`] - floor occupancy view
//! - [`customers`] - customer records
//! - [`settings`] - restaurant settings
//! - [`statistics`] - dashboard aggregates

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub mod categories;
pub mod customers;
pub mod health;
pub mod menu_items;
pub mod orders;
pub mod settings;
pub mod statistics;
pub mod tables;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(orders::router())
        .merge(menu_items::router())
        .merge(categories::router())
        .merge(tables::router())
        .merge(customers::router())
        .merge(settings::router())
        .merge(statistics::router())
        .merge(health::router())
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // CORS - the counter UI runs on a different origin in development
        .layer(CorsLayer::permissive())
        // Compression - gzip responses
        .layer(CompressionLayer::new())
        // Trace - request spans at INFO level
        .layer(TraceLayer::new_for_http())
        // Request ID - tag every request, echo the header back
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state)
}
