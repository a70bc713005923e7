//! Reservation endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use booking::{CreateReservation, InventoryApi, ReservationOrchestrator};
use common::{ReservationId, TripId};
use reservation::{InMemoryReservationStore, Reservation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<I: InventoryApi> {
    pub orchestrator: ReservationOrchestrator<I, InMemoryReservationStore>,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CreateReservationRequest {
    pub trip_id: Option<String>,
    pub passenger_name: Option<String>,
    /// Defaults to one seat when omitted.
    pub seats: Option<u32>,
}

// -- Response types --

#[derive(Serialize)]
pub struct ReservationResponse {
    pub id: String,
    pub trip_id: String,
    pub passenger_name: String,
    pub seats_booked: u32,
    pub status: String,
    pub created_at: String,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id.to_string(),
            trip_id: r.trip_id.to_string(),
            passenger_name: r.passenger_name,
            seats_booked: r.seats_booked,
            status: r.status.to_string(),
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

// -- Handlers --

/// POST /reservations — book seats on a trip.
#[tracing::instrument(skip(state, req))]
pub async fn create<I: InventoryApi>(
    State(state): State<Arc<AppState<I>>>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(axum::http::StatusCode, Json<ReservationResponse>), ApiError> {
    let trip_id = req
        .trip_id
        .as_deref()
        .and_then(|s| uuid::Uuid::parse_str(s).ok())
        .map(TripId::from_uuid);
    let (Some(trip_id), Some(passenger_name)) = (trip_id, req.passenger_name) else {
        return Err(ApiError::BadRequest(
            "trip_id, passenger_name, seats required".to_string(),
        ));
    };

    let reservation = state
        .orchestrator
        .create_reservation(CreateReservation {
            trip_id,
            passenger_name,
            seats: req.seats.unwrap_or(1),
        })
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(ReservationResponse::from(reservation)),
    ))
}

/// POST /reservations/:id/cancel — cancel a reservation.
///
/// Cancelling an already-cancelled reservation returns the record
/// unchanged with 200.
#[tracing::instrument(skip(state))]
pub async fn cancel<I: InventoryApi>(
    State(state): State<Arc<AppState<I>>>,
    Path(id): Path<String>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let reservation_id = parse_reservation_id(&id)?;
    let reservation = state.orchestrator.cancel_reservation(reservation_id).await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

/// GET /reservations — list all reservations, newest first.
#[tracing::instrument(skip(state))]
pub async fn list<I: InventoryApi>(
    State(state): State<Arc<AppState<I>>>,
) -> Result<Json<Vec<ReservationResponse>>, ApiError> {
    let reservations = state.orchestrator.list_reservations().await?;
    Ok(Json(
        reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect(),
    ))
}

/// GET /reservations/:id — load a reservation by ID.
#[tracing::instrument(skip(state))]
pub async fn get<I: InventoryApi>(
    State(state): State<Arc<AppState<I>>>,
    Path(id): Path<String>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let reservation_id = parse_reservation_id(&id)?;
    let reservation = state.orchestrator.get_reservation(reservation_id).await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

fn parse_reservation_id(id: &str) -> Result<ReservationId, ApiError> {
    let uuid = uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))?;
    Ok(ReservationId::from_uuid(uuid))
}
