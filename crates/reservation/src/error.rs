//! Reservation store error types.

use common::ReservationId;
use thiserror::Error;

/// Errors that can occur during reservation storage operations.
#[derive(Debug, Error)]
pub enum ReservationStoreError {
    /// Reservation not found.
    #[error("Reservation not found: {0}")]
    NotFound(ReservationId),

    /// The backing storage failed.
    #[error("Reservation storage error: {0}")]
    Storage(String),
}

/// Convenience type alias for reservation store results.
pub type Result<T> = std::result::Result<T, ReservationStoreError>;
