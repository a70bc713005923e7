//! Inventory error types.

use common::{RouteId, TripId};
use thiserror::Error;

/// Errors that can occur during schedule and seat inventory operations.
///
/// `TripNotFound` and `InsufficientSeats` are expected business outcomes,
/// surfaced as structured results rather than fatal faults.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Route not found.
    #[error("Route not found: {0}")]
    RouteNotFound(RouteId),

    /// Trip not found.
    #[error("Trip not found: {0}")]
    TripNotFound(TripId),

    /// The trip does not have enough seats left for the request.
    #[error("Insufficient seats: requested {requested}, available {available}")]
    InsufficientSeats { requested: u32, available: u32 },

    /// A seat count must be positive.
    #[error("Seat count must be positive")]
    InvalidSeatCount,
}

/// Convenience type alias for inventory results.
pub type Result<T> = std::result::Result<T, InventoryError>;
