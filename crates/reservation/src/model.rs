//! Reservation model.

use chrono::{DateTime, Utc};
use common::{ReservationId, TripId};
use serde::{Deserialize, Serialize};

use crate::status::ReservationStatus;

/// A booking of seats on a trip.
///
/// `trip_id` is an opaque foreign key into the schedule service; it is not
/// validated locally. `seats_booked` is immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub trip_id: TripId,
    pub passenger_name: String,
    pub seats_booked: u32,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a new booked reservation with a fresh identifier.
    pub fn booked(trip_id: TripId, passenger_name: impl Into<String>, seats_booked: u32) -> Self {
        Self {
            id: ReservationId::new(),
            trip_id,
            passenger_name: passenger_name.into(),
            seats_booked,
            status: ReservationStatus::Booked,
            created_at: Utc::now(),
        }
    }

    /// Returns true if the reservation is cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.status == ReservationStatus::Cancelled
    }
}
