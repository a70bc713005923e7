//! Route catalog endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use inventory::Route;
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct CreateRouteRequest {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

/// POST /routes — create a route between two cities.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateRouteRequest>,
) -> Result<(axum::http::StatusCode, Json<Route>), ApiError> {
    let origin = req.origin.as_deref().map(str::trim).unwrap_or_default();
    let destination = req.destination.as_deref().map(str::trim).unwrap_or_default();
    if origin.is_empty() || destination.is_empty() {
        return Err(ApiError::BadRequest(
            "origin and destination are required".to_string(),
        ));
    }

    let route = state.store.create_route(origin, destination).await;
    Ok((axum::http::StatusCode::CREATED, Json(route)))
}

/// GET /routes — list all routes.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Route>> {
    Json(state.store.list_routes().await)
}
