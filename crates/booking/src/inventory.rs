//! Seat inventory client trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::{SeatAllocation, SeatRelease, TripId};

use crate::error::{BookingError, Result};

/// Client-side view of the schedule service's seat operations.
///
/// The schedule service is the sole authority over seat counts; the
/// orchestrator never caches `seats_available` across calls.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// Returns the seats currently available on a trip.
    ///
    /// Advisory only: a subsequent [`InventoryApi::allocate`] may still
    /// fail even when this reported enough seats.
    async fn availability(&self, trip_id: TripId) -> Result<u32>;

    /// Atomically takes `count` seats from a trip.
    async fn allocate(&self, trip_id: TripId, count: u32) -> Result<SeatAllocation>;

    /// Returns `count` seats to a trip, clamped at the trip's capacity.
    async fn release(&self, trip_id: TripId, count: u32) -> Result<SeatRelease>;
}

#[derive(Debug, Default)]
struct InMemoryInventoryState {
    seats: HashMap<TripId, TripSeats>,
    reported_availability: Option<u32>,
    allocate_calls: u32,
    release_calls: u32,
    fail_on_availability: bool,
    fail_on_allocate: bool,
    fail_on_release: bool,
}

#[derive(Debug, Clone, Copy)]
struct TripSeats {
    total: u32,
    available: u32,
}

/// In-memory inventory client for testing.
///
/// Mirrors the schedule service's semantics, including the clamped
/// release, and counts calls so tests can assert that an idempotent
/// cancel issues no second release.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventoryApi {
    state: Arc<RwLock<InMemoryInventoryState>>,
}

impl InMemoryInventoryApi {
    /// Creates a new inventory client with no trips.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a trip with the given capacity, all seats available.
    pub fn add_trip(&self, trip_id: TripId, seats_total: u32) {
        self.state.write().unwrap().seats.insert(
            trip_id,
            TripSeats {
                total: seats_total,
                available: seats_total,
            },
        );
    }

    /// Configures availability calls to fail with an upstream error.
    pub fn set_fail_on_availability(&self, fail: bool) {
        self.state.write().unwrap().fail_on_availability = fail;
    }

    /// Overrides the value availability reports, leaving the real counter
    /// untouched. Lets tests stage a stale advisory read.
    pub fn set_reported_availability(&self, value: Option<u32>) {
        self.state.write().unwrap().reported_availability = value;
    }

    /// Configures allocate calls to fail with an upstream error.
    pub fn set_fail_on_allocate(&self, fail: bool) {
        self.state.write().unwrap().fail_on_allocate = fail;
    }

    /// Configures release calls to fail with an upstream error.
    pub fn set_fail_on_release(&self, fail: bool) {
        self.state.write().unwrap().fail_on_release = fail;
    }

    /// Returns how many allocate calls were issued.
    pub fn allocate_calls(&self) -> u32 {
        self.state.read().unwrap().allocate_calls
    }

    /// Returns how many release calls were issued.
    pub fn release_calls(&self) -> u32 {
        self.state.read().unwrap().release_calls
    }

    /// Returns the seats currently available on a trip, for assertions.
    pub fn seats_available(&self, trip_id: TripId) -> Option<u32> {
        self.state
            .read()
            .unwrap()
            .seats
            .get(&trip_id)
            .map(|s| s.available)
    }
}

#[async_trait]
impl InventoryApi for InMemoryInventoryApi {
    async fn availability(&self, trip_id: TripId) -> Result<u32> {
        let state = self.state.read().unwrap();
        if state.fail_on_availability {
            return Err(BookingError::Upstream("availability unreachable".to_string()));
        }
        let real = state
            .seats
            .get(&trip_id)
            .map(|s| s.available)
            .ok_or(BookingError::TripNotFound(trip_id))?;
        Ok(state.reported_availability.unwrap_or(real))
    }

    async fn allocate(&self, trip_id: TripId, count: u32) -> Result<SeatAllocation> {
        let mut state = self.state.write().unwrap();
        state.allocate_calls += 1;
        if state.fail_on_allocate {
            return Err(BookingError::Upstream("allocate unreachable".to_string()));
        }
        let seats = state
            .seats
            .get_mut(&trip_id)
            .ok_or(BookingError::TripNotFound(trip_id))?;
        if seats.available < count {
            return Err(BookingError::InsufficientSeats {
                available: seats.available,
            });
        }
        seats.available -= count;
        Ok(SeatAllocation {
            trip_id,
            allocated: count,
            seats_available: seats.available,
        })
    }

    async fn release(&self, trip_id: TripId, count: u32) -> Result<SeatRelease> {
        let mut state = self.state.write().unwrap();
        state.release_calls += 1;
        if state.fail_on_release {
            return Err(BookingError::Upstream("release unreachable".to_string()));
        }
        let seats = state
            .seats
            .get_mut(&trip_id)
            .ok_or(BookingError::TripNotFound(trip_id))?;
        let new_available = seats.available.saturating_add(count).min(seats.total);
        let released = new_available - seats.available;
        seats.available = new_available;
        Ok(SeatRelease {
            trip_id,
            released,
            seats_available: new_available,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allocate_and_release_roundtrip() {
        let api = InMemoryInventoryApi::new();
        let trip_id = TripId::new();
        api.add_trip(trip_id, 10);

        let allocation = api.allocate(trip_id, 4).await.unwrap();
        assert_eq!(allocation.seats_available, 6);

        let release = api.release(trip_id, 4).await.unwrap();
        assert_eq!(release.released, 4);
        assert_eq!(release.seats_available, 10);
        assert_eq!(api.allocate_calls(), 1);
        assert_eq!(api.release_calls(), 1);
    }

    #[tokio::test]
    async fn release_is_clamped() {
        let api = InMemoryInventoryApi::new();
        let trip_id = TripId::new();
        api.add_trip(trip_id, 5);

        let release = api.release(trip_id, 3).await.unwrap();
        assert_eq!(release.released, 0);
        assert_eq!(release.seats_available, 5);
    }

    #[tokio::test]
    async fn unknown_trip_is_not_found() {
        let api = InMemoryInventoryApi::new();
        let result = api.availability(TripId::new()).await;
        assert!(matches!(result, Err(BookingError::TripNotFound(_))));
    }

    #[tokio::test]
    async fn fail_switch_surfaces_upstream_error() {
        let api = InMemoryInventoryApi::new();
        let trip_id = TripId::new();
        api.add_trip(trip_id, 5);
        api.set_fail_on_allocate(true);

        let result = api.allocate(trip_id, 1).await;
        assert!(matches!(result, Err(BookingError::Upstream(_))));
        assert_eq!(api.seats_available(trip_id), Some(5));
    }
}
