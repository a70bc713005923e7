//! HTTP API for the schedule and seat inventory authority.
//!
//! Exposes route and trip management plus the seat operations
//! (availability, allocate, release) that the booking service calls, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use inventory::ScheduleStore;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub store: ScheduleStore,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/routes", post(routes::catalog::create))
        .route("/routes", get(routes::catalog::list))
        .route("/trips", post(routes::trips::create))
        .route("/trips/search", get(routes::trips::search))
        .route("/trips/{id}", get(routes::trips::get))
        .route("/trips/{id}/availability", get(routes::trips::availability))
        .route("/trips/{id}/allocate", post(routes::trips::allocate))
        .route("/trips/{id}/release", post(routes::trips::release))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state over an empty store.
pub fn create_default_state() -> Arc<AppState> {
    Arc::new(AppState {
        store: ScheduleStore::new(),
    })
}
