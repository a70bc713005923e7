//! In-memory schedule store with per-trip seat accounting.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use common::{RouteId, SeatAllocation, SeatRelease, TripId};
use tokio::sync::{Mutex, RwLock};

use crate::error::{InventoryError, Result};
use crate::route::Route;
use crate::trip::Trip;

/// Store for routes, trips, and seat counters.
///
/// Each trip lives behind its own mutex; allocate and release resolve the
/// trip handle under a brief registry read lock, then perform the
/// read-check-write inside the per-trip critical section. Two concurrent
/// allocations against a trip with one seat left can therefore never both
/// succeed, while operations on different trips do not contend.
#[derive(Clone, Default)]
pub struct ScheduleStore {
    routes: Arc<RwLock<HashMap<RouteId, Route>>>,
    trips: Arc<RwLock<HashMap<TripId, Arc<Mutex<Trip>>>>>,
}

impl ScheduleStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a route between two cities.
    #[tracing::instrument(skip(self))]
    pub async fn create_route(
        &self,
        origin: impl Into<String> + std::fmt::Debug,
        destination: impl Into<String> + std::fmt::Debug,
    ) -> Route {
        let route = Route::new(origin, destination);
        self.routes.write().await.insert(route.id, route.clone());
        route
    }

    /// Returns all routes.
    pub async fn list_routes(&self) -> Vec<Route> {
        self.routes.read().await.values().cloned().collect()
    }

    /// Returns the route with the given ID, if any.
    pub async fn get_route(&self, route_id: RouteId) -> Option<Route> {
        self.routes.read().await.get(&route_id).cloned()
    }

    /// Returns the number of routes. Used to decide whether to seed.
    pub async fn route_count(&self) -> usize {
        self.routes.read().await.len()
    }

    /// Creates a trip on an existing route with all seats available.
    #[tracing::instrument(skip(self))]
    pub async fn create_trip(
        &self,
        route_id: RouteId,
        departure_time: DateTime<Utc>,
        seats_total: u32,
    ) -> Result<Trip> {
        if seats_total == 0 {
            return Err(InventoryError::InvalidSeatCount);
        }
        if !self.routes.read().await.contains_key(&route_id) {
            return Err(InventoryError::RouteNotFound(route_id));
        }

        let trip = Trip::new(route_id, departure_time, seats_total);
        self.trips
            .write()
            .await
            .insert(trip.id, Arc::new(Mutex::new(trip.clone())));
        Ok(trip)
    }

    /// Returns a snapshot of the trip with the given ID, if any.
    pub async fn get_trip(&self, trip_id: TripId) -> Option<Trip> {
        let slot = self.trips.read().await.get(&trip_id).cloned()?;
        let trip = slot.lock().await;
        Some(trip.clone())
    }

    /// Returns snapshots of all trips matching origin, destination, and
    /// departure day, ordered by departure time.
    pub async fn search_trips(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
    ) -> Vec<Trip> {
        let route_ids: Vec<RouteId> = {
            let routes = self.routes.read().await;
            routes
                .values()
                .filter(|r| r.connects(origin, destination))
                .map(|r| r.id)
                .collect()
        };

        let slots: Vec<Arc<Mutex<Trip>>> = {
            let trips = self.trips.read().await;
            trips.values().cloned().collect()
        };

        let mut matches = Vec::new();
        for slot in slots {
            let trip = slot.lock().await;
            if route_ids.contains(&trip.route_id) && trip.departs_on(date) {
                matches.push(trip.clone());
            }
        }
        matches.sort_by_key(|t| t.departure_time);
        matches
    }

    /// Returns the seats currently available on a trip.
    ///
    /// Advisory only: by the time the caller acts on the value, a
    /// concurrent allocation may already have consumed the seats. The
    /// authoritative check is [`ScheduleStore::allocate`].
    pub async fn availability(&self, trip_id: TripId) -> Result<u32> {
        let slot = self.trip_slot(trip_id).await?;
        let trip = slot.lock().await;
        Ok(trip.seats_available)
    }

    /// Atomically takes `count` seats from a trip.
    ///
    /// Fails with `InsufficientSeats` when fewer than `count` seats remain;
    /// the counter is left untouched in that case.
    #[tracing::instrument(skip(self))]
    pub async fn allocate(&self, trip_id: TripId, count: u32) -> Result<SeatAllocation> {
        if count == 0 {
            return Err(InventoryError::InvalidSeatCount);
        }

        let slot = self.trip_slot(trip_id).await?;
        let mut trip = slot.lock().await;

        if trip.seats_available < count {
            metrics::counter!("seat_allocation_conflicts_total").increment(1);
            return Err(InventoryError::InsufficientSeats {
                requested: count,
                available: trip.seats_available,
            });
        }

        trip.seats_available -= count;
        metrics::counter!("seats_allocated_total").increment(u64::from(count));
        tracing::debug!(%trip_id, count, seats_available = trip.seats_available, "seats allocated");

        Ok(SeatAllocation {
            trip_id,
            allocated: count,
            seats_available: trip.seats_available,
        })
    }

    /// Returns `count` seats to a trip, clamped at the trip's capacity.
    ///
    /// The clamp makes release safe to retry: a duplicate compensation
    /// releases nothing and reports `released: 0` instead of inflating the
    /// counter past `seats_total`.
    #[tracing::instrument(skip(self))]
    pub async fn release(&self, trip_id: TripId, count: u32) -> Result<SeatRelease> {
        if count == 0 {
            return Err(InventoryError::InvalidSeatCount);
        }

        let slot = self.trip_slot(trip_id).await?;
        let mut trip = slot.lock().await;

        let new_available = trip.seats_available.saturating_add(count).min(trip.seats_total);
        let released = new_available - trip.seats_available;
        trip.seats_available = new_available;
        metrics::counter!("seats_released_total").increment(u64::from(released));
        tracing::debug!(%trip_id, released, seats_available = trip.seats_available, "seats released");

        Ok(SeatRelease {
            trip_id,
            released,
            seats_available: trip.seats_available,
        })
    }

    async fn trip_slot(&self, trip_id: TripId) -> Result<Arc<Mutex<Trip>>> {
        self.trips
            .read()
            .await
            .get(&trip_id)
            .cloned()
            .ok_or(InventoryError::TripNotFound(trip_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with_trip(seats_total: u32) -> (ScheduleStore, TripId) {
        let store = ScheduleStore::new();
        let route = store.create_route("City A", "City B").await;
        let trip = store
            .create_trip(route.id, Utc::now(), seats_total)
            .await
            .unwrap();
        (store, trip.id)
    }

    #[tokio::test]
    async fn create_trip_requires_existing_route() {
        let store = ScheduleStore::new();
        let result = store.create_trip(RouteId::new(), Utc::now(), 10).await;
        assert!(matches!(result, Err(InventoryError::RouteNotFound(_))));
    }

    #[tokio::test]
    async fn create_trip_rejects_zero_capacity() {
        let store = ScheduleStore::new();
        let route = store.create_route("City A", "City B").await;
        let result = store.create_trip(route.id, Utc::now(), 0).await;
        assert!(matches!(result, Err(InventoryError::InvalidSeatCount)));
    }

    #[tokio::test]
    async fn allocate_decrements_and_returns_remainder() {
        let (store, trip_id) = store_with_trip(10).await;

        let allocation = store.allocate(trip_id, 3).await.unwrap();
        assert_eq!(allocation.allocated, 3);
        assert_eq!(allocation.seats_available, 7);
        assert_eq!(store.availability(trip_id).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn allocate_fails_when_insufficient() {
        let (store, trip_id) = store_with_trip(2).await;

        let result = store.allocate(trip_id, 3).await;
        assert!(matches!(
            result,
            Err(InventoryError::InsufficientSeats {
                requested: 3,
                available: 2
            })
        ));
        // Counter untouched after the rejection.
        assert_eq!(store.availability(trip_id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn allocate_unknown_trip() {
        let store = ScheduleStore::new();
        let result = store.allocate(TripId::new(), 1).await;
        assert!(matches!(result, Err(InventoryError::TripNotFound(_))));
    }

    #[tokio::test]
    async fn allocate_rejects_zero_count() {
        let (store, trip_id) = store_with_trip(5).await;
        let result = store.allocate(trip_id, 0).await;
        assert!(matches!(result, Err(InventoryError::InvalidSeatCount)));
    }

    #[tokio::test]
    async fn release_is_clamped_at_capacity() {
        let (store, trip_id) = store_with_trip(10).await;
        store.allocate(trip_id, 4).await.unwrap();

        let release = store.release(trip_id, 100).await.unwrap();
        assert_eq!(release.released, 4);
        assert_eq!(release.seats_available, 10);

        // A duplicate compensation releases nothing.
        let duplicate = store.release(trip_id, 4).await.unwrap();
        assert_eq!(duplicate.released, 0);
        assert_eq!(duplicate.seats_available, 10);
    }

    #[tokio::test]
    async fn release_reports_actual_increase() {
        let (store, trip_id) = store_with_trip(10).await;
        store.allocate(trip_id, 2).await.unwrap();

        let release = store.release(trip_id, 2).await.unwrap();
        assert_eq!(release.released, 2);
        assert_eq!(release.seats_available, 10);
    }

    #[tokio::test]
    async fn release_unknown_trip() {
        let store = ScheduleStore::new();
        let result = store.release(TripId::new(), 1).await;
        assert!(matches!(result, Err(InventoryError::TripNotFound(_))));
    }

    #[tokio::test]
    async fn availability_unknown_trip() {
        let store = ScheduleStore::new();
        let result = store.availability(TripId::new()).await;
        assert!(matches!(result, Err(InventoryError::TripNotFound(_))));
    }

    #[tokio::test]
    async fn search_matches_route_and_day() {
        let store = ScheduleStore::new();
        let ab = store.create_route("City A", "City B").await;
        let ac = store.create_route("City A", "City C").await;

        let on_day = "2026-08-10T08:00:00Z".parse().unwrap();
        let later_that_day = "2026-08-10T16:00:00Z".parse().unwrap();
        let other_day = "2026-08-11T08:00:00Z".parse().unwrap();

        let t1 = store.create_trip(ab.id, later_that_day, 40).await.unwrap();
        let t2 = store.create_trip(ab.id, on_day, 40).await.unwrap();
        store.create_trip(ab.id, other_day, 40).await.unwrap();
        store.create_trip(ac.id, on_day, 40).await.unwrap();

        let found = store
            .search_trips("City A", "City B", "2026-08-10".parse().unwrap())
            .await;
        assert_eq!(found.len(), 2);
        // Ordered by departure time.
        assert_eq!(found[0].id, t2.id);
        assert_eq!(found[1].id, t1.id);
    }

    #[tokio::test]
    async fn get_trip_returns_snapshot() {
        let (store, trip_id) = store_with_trip(10).await;
        store.allocate(trip_id, 1).await.unwrap();

        let snapshot = store.get_trip(trip_id).await.unwrap();
        assert_eq!(snapshot.seats_available, 9);
        assert_eq!(snapshot.seats_total, 10);
        assert!(store.get_trip(TripId::new()).await.is_none());
    }
}
