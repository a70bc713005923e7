//! Shared types for the transit booking system.
//!
//! Identifier newtypes and the seat-operation payloads exchanged between
//! the schedule service and the booking service.

mod types;

pub use types::{ReservationId, RouteId, SeatAllocation, SeatRelease, TripAvailability, TripId};
