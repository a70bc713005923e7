//! Booking error taxonomy.

use common::{ReservationId, TripId};
use reservation::ReservationStoreError;
use thiserror::Error;

/// Errors that can occur while coordinating a booking or cancellation.
///
/// `TripNotFound` and `InsufficientSeats` carry the schedule service's
/// structured rejection so the true cause, including current availability,
/// reaches the caller. `Upstream` covers network errors, timeouts, and
/// unexpected responses; a timeout is an ambiguous outcome, never treated
/// as success or failure of the underlying mutation.
#[derive(Debug, Error)]
pub enum BookingError {
    /// Malformed or missing input.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The schedule service does not know the trip.
    #[error("Trip not found: {0}")]
    TripNotFound(TripId),

    /// Reservation not found.
    #[error("Reservation not found: {0}")]
    ReservationNotFound(ReservationId),

    /// The trip does not have enough seats left.
    #[error("Insufficient seats: {available} available")]
    InsufficientSeats { available: u32 },

    /// The schedule service could not be reached or answered unexpectedly.
    #[error("Schedule service unavailable: {0}")]
    Upstream(String),

    /// The local reservation store failed.
    #[error(transparent)]
    Store(#[from] ReservationStoreError),
}

/// Convenience type alias for booking results.
pub type Result<T> = std::result::Result<T, BookingError>;
