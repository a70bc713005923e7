//! HTTP API for the booking orchestrator.
//!
//! Exposes reservation creation, cancellation, and lookup. Every booking
//! and cancellation runs the two-step saga against the schedule service;
//! the handlers pass the schedule service's structured rejections through
//! to the caller.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use booking::InventoryApi;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::reservations::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<I: InventoryApi + 'static>(
    state: Arc<AppState<I>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/reservations", post(routes::reservations::create::<I>))
        .route("/reservations", get(routes::reservations::list::<I>))
        .route("/reservations/{id}", get(routes::reservations::get::<I>))
        .route(
            "/reservations/{id}/cancel",
            post(routes::reservations::cancel::<I>),
        )
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

/// Creates application state over the given inventory client and an
/// in-memory reservation store.
pub fn create_state<I: InventoryApi>(inventory: I) -> Arc<AppState<I>> {
    use booking::ReservationOrchestrator;
    use reservation::InMemoryReservationStore;

    Arc::new(AppState {
        orchestrator: ReservationOrchestrator::new(inventory, InMemoryReservationStore::new()),
    })
}
