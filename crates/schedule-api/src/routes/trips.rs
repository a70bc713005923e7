//! Trip and seat operation endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::{DateTime, NaiveDate, Utc};
use common::{RouteId, SeatAllocation, SeatRelease, TripAvailability, TripId};
use inventory::{Route, Trip};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateTripRequest {
    pub route_id: Option<String>,
    pub departure_time: Option<String>,
    pub seats_total: Option<u32>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub origin: String,
    pub destination: String,
    /// Calendar day in `YYYY-MM-DD` form.
    pub date: String,
}

#[derive(Deserialize)]
pub struct SeatCountRequest {
    pub count: Option<u32>,
}

// -- Response types --

#[derive(Serialize)]
pub struct TripResponse {
    pub id: TripId,
    pub route: Route,
    pub departure_time: DateTime<Utc>,
    pub seats_total: u32,
    pub seats_available: u32,
}

// -- Handlers --

/// POST /trips — create a trip on an existing route.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTripRequest>,
) -> Result<(axum::http::StatusCode, Json<TripResponse>), ApiError> {
    let route_id = req
        .route_id
        .as_deref()
        .and_then(|s| uuid::Uuid::parse_str(s).ok())
        .map(RouteId::from_uuid);
    let departure_time = req
        .departure_time
        .as_deref()
        .and_then(|s| s.parse::<DateTime<Utc>>().ok());
    let (Some(route_id), Some(departure_time), Some(seats_total)) =
        (route_id, departure_time, req.seats_total)
    else {
        return Err(ApiError::BadRequest(
            "route_id, departure_time (RFC 3339), seats_total required".to_string(),
        ));
    };

    let trip = state
        .store
        .create_trip(route_id, departure_time, seats_total)
        .await?;
    let response = trip_response(&state, trip).await?;
    Ok((axum::http::StatusCode::CREATED, Json(response)))
}

/// GET /trips/search — find trips by origin, destination, and day.
#[tracing::instrument(skip(state, query))]
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<TripResponse>>, ApiError> {
    let date: NaiveDate = query
        .date
        .parse()
        .map_err(|_| ApiError::BadRequest("invalid date format".to_string()))?;

    let trips = state
        .store
        .search_trips(&query.origin, &query.destination, date)
        .await;

    let mut responses = Vec::with_capacity(trips.len());
    for trip in trips {
        responses.push(trip_response(&state, trip).await?);
    }
    Ok(Json(responses))
}

/// GET /trips/:id — load a trip by ID.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TripResponse>, ApiError> {
    let trip_id = parse_trip_id(&id)?;
    let trip = state
        .store
        .get_trip(trip_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Trip {id} not found")))?;

    Ok(Json(trip_response(&state, trip).await?))
}

/// GET /trips/:id/availability — read the current seat availability.
///
/// Advisory only: the value can be stale by the time the caller acts on
/// it. Allocation decisions are made by POST /trips/:id/allocate.
#[tracing::instrument(skip(state))]
pub async fn availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TripAvailability>, ApiError> {
    let trip_id = parse_trip_id(&id)?;
    let seats_available = state.store.availability(trip_id).await?;

    Ok(Json(TripAvailability {
        trip_id,
        seats_available,
    }))
}

/// POST /trips/:id/allocate — atomically take seats from a trip.
#[tracing::instrument(skip(state, req))]
pub async fn allocate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SeatCountRequest>,
) -> Result<Json<SeatAllocation>, ApiError> {
    let trip_id = parse_trip_id(&id)?;
    let allocation = state
        .store
        .allocate(trip_id, req.count.unwrap_or(0))
        .await?;
    Ok(Json(allocation))
}

/// POST /trips/:id/release — return seats to a trip, clamped at capacity.
#[tracing::instrument(skip(state, req))]
pub async fn release(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SeatCountRequest>,
) -> Result<Json<SeatRelease>, ApiError> {
    let trip_id = parse_trip_id(&id)?;
    let release = state.store.release(trip_id, req.count.unwrap_or(0)).await?;
    Ok(Json(release))
}

async fn trip_response(state: &AppState, trip: Trip) -> Result<TripResponse, ApiError> {
    let route = state
        .store
        .get_route(trip.route_id)
        .await
        .ok_or_else(|| ApiError::Internal(format!("route missing for trip {}", trip.id)))?;

    Ok(TripResponse {
        id: trip.id,
        route,
        departure_time: trip.departure_time,
        seats_total: trip.seats_total,
        seats_available: trip.seats_available,
    })
}

fn parse_trip_id(id: &str) -> Result<TripId, ApiError> {
    let uuid = uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))?;
    Ok(TripId::from_uuid(uuid))
}
