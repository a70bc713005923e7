//! Reservation store trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::ReservationId;
use tokio::sync::RwLock;

use crate::error::{ReservationStoreError, Result};
use crate::model::Reservation;
use crate::status::ReservationStatus;

/// Keyed storage for reservation records.
///
/// Records are created, read, listed, and status-updated; they are never
/// deleted.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Persists a new reservation and returns it.
    async fn create(&self, reservation: Reservation) -> Result<Reservation>;

    /// Returns the reservation with the given ID, if any.
    async fn get(&self, id: ReservationId) -> Result<Option<Reservation>>;

    /// Returns all reservations, newest first.
    async fn list(&self) -> Result<Vec<Reservation>>;

    /// Sets the status of an existing reservation and returns the updated
    /// record. Fails with `NotFound` if the reservation does not exist.
    async fn update_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<Reservation>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    reservations: HashMap<ReservationId, Reservation>,
    fail_on_create: bool,
    fail_on_update: bool,
}

/// In-memory reservation store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReservationStore {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryReservationStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail the next create call.
    pub async fn set_fail_on_create(&self, fail: bool) {
        self.state.write().await.fail_on_create = fail;
    }

    /// Configures the store to fail the next status update.
    pub async fn set_fail_on_update(&self, fail: bool) {
        self.state.write().await.fail_on_update = fail;
    }

    /// Returns the number of stored reservations.
    pub async fn len(&self) -> usize {
        self.state.read().await.reservations.len()
    }

    /// Returns true if the store holds no reservations.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.reservations.is_empty()
    }
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn create(&self, reservation: Reservation) -> Result<Reservation> {
        let mut state = self.state.write().await;
        if state.fail_on_create {
            return Err(ReservationStoreError::Storage(
                "simulated create failure".to_string(),
            ));
        }
        state
            .reservations
            .insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn get(&self, id: ReservationId) -> Result<Option<Reservation>> {
        Ok(self.state.read().await.reservations.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Reservation>> {
        let state = self.state.read().await;
        let mut all: Vec<Reservation> = state.reservations.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn update_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> Result<Reservation> {
        let mut state = self.state.write().await;
        if state.fail_on_update {
            return Err(ReservationStoreError::Storage(
                "simulated update failure".to_string(),
            ));
        }
        let reservation = state
            .reservations
            .get_mut(&id)
            .ok_or(ReservationStoreError::NotFound(id))?;
        reservation.status = status;
        Ok(reservation.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::TripId;

    #[tokio::test]
    async fn create_and_get() {
        let store = InMemoryReservationStore::new();
        let reservation = Reservation::booked(TripId::new(), "Ada Lovelace", 2);

        let created = store.create(reservation.clone()).await.unwrap();
        assert_eq!(created, reservation);

        let fetched = store.get(reservation.id).await.unwrap().unwrap();
        assert_eq!(fetched, reservation);
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let store = InMemoryReservationStore::new();
        assert!(store.get(ReservationId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let store = InMemoryReservationStore::new();
        let mut first = Reservation::booked(TripId::new(), "First", 1);
        let mut second = Reservation::booked(TripId::new(), "Second", 1);
        // Pin distinct timestamps so ordering is deterministic.
        first.created_at = "2026-08-01T10:00:00Z".parse().unwrap();
        second.created_at = "2026-08-01T11:00:00Z".parse().unwrap();

        store.create(first.clone()).await.unwrap();
        store.create(second.clone()).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[tokio::test]
    async fn update_status_transitions_record() {
        let store = InMemoryReservationStore::new();
        let reservation = Reservation::booked(TripId::new(), "Ada Lovelace", 2);
        store.create(reservation.clone()).await.unwrap();

        let updated = store
            .update_status(reservation.id, ReservationStatus::Cancelled)
            .await
            .unwrap();
        assert!(updated.is_cancelled());
        // seats_booked is untouched by the status update.
        assert_eq!(updated.seats_booked, 2);
    }

    #[tokio::test]
    async fn update_status_missing_reservation() {
        let store = InMemoryReservationStore::new();
        let result = store
            .update_status(ReservationId::new(), ReservationStatus::Cancelled)
            .await;
        assert!(matches!(result, Err(ReservationStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn fail_switches_surface_storage_errors() {
        let store = InMemoryReservationStore::new();
        store.set_fail_on_create(true).await;

        let result = store
            .create(Reservation::booked(TripId::new(), "Ada Lovelace", 1))
            .await;
        assert!(matches!(result, Err(ReservationStoreError::Storage(_))));
        assert!(store.is_empty().await);
    }
}
