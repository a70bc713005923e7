//! Reservation status state machine.

use serde::{Deserialize, Serialize};

/// The status of a reservation.
///
/// State transitions:
/// ```text
/// Booked ──► Cancelled
/// ```
/// The transition is one-way; a cancelled reservation is never re-booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReservationStatus {
    /// Seats are held against the trip.
    #[default]
    Booked,

    /// Seats have been returned to the trip (terminal state).
    Cancelled,
}

impl ReservationStatus {
    /// Returns true if the reservation can be cancelled from this status.
    pub fn can_cancel(&self) -> bool {
        matches!(self, ReservationStatus::Booked)
    }

    /// Returns true if this is a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReservationStatus::Cancelled)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Booked => "Booked",
            ReservationStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
