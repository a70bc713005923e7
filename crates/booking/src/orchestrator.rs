//! Saga coordinator for bookings and cancellations.

use common::ReservationId;
use reservation::{Reservation, ReservationStatus, ReservationStore};

use crate::error::{BookingError, Result};
use crate::inventory::InventoryApi;

/// Request to book seats on a trip.
#[derive(Debug, Clone)]
pub struct CreateReservation {
    pub trip_id: common::TripId,
    pub passenger_name: String,
    pub seats: u32,
}

/// Coordinates the two-step booking and cancellation sagas.
///
/// Booking: allocate seats on the schedule service, then write the local
/// reservation record. Cancellation: release the seats, then flip the
/// record to `Cancelled`. In both directions the remote, authoritative
/// call happens-before the local write; the local write is never performed
/// on a failed remote call, and a failed local write after a committed
/// remote call is compensated (create) or left retryable (cancel).
pub struct ReservationOrchestrator<I, R>
where
    I: InventoryApi,
    R: ReservationStore,
{
    inventory: I,
    reservations: R,
}

impl<I, R> ReservationOrchestrator<I, R>
where
    I: InventoryApi,
    R: ReservationStore,
{
    /// Creates a new orchestrator over the given inventory client and
    /// reservation store.
    pub fn new(inventory: I, reservations: R) -> Self {
        Self {
            inventory,
            reservations,
        }
    }

    /// Books seats on a trip and records the reservation.
    #[tracing::instrument(skip(self, cmd), fields(trip_id = %cmd.trip_id, seats = cmd.seats))]
    pub async fn create_reservation(&self, cmd: CreateReservation) -> Result<Reservation> {
        metrics::counter!("booking_attempts_total").increment(1);
        let booking_start = std::time::Instant::now();

        let passenger_name = cmd.passenger_name.trim();
        if passenger_name.is_empty() {
            return Err(BookingError::Validation(
                "passenger_name is required".to_string(),
            ));
        }
        if cmd.seats == 0 {
            return Err(BookingError::Validation(
                "seats must be positive".to_string(),
            ));
        }

        // Advisory pre-check. Rejecting here avoids a doomed allocation,
        // but only the allocate call below is authoritative: the seats may
        // be gone by the time it runs.
        let available = self
            .inventory
            .availability(cmd.trip_id)
            .await
            .map_err(|e| match e {
                BookingError::TripNotFound(_) => BookingError::Upstream(
                    "trip not found or schedule service unavailable".to_string(),
                ),
                other => other,
            })?;
        if available < cmd.seats {
            metrics::counter!("booking_rejected_total").increment(1);
            return Err(BookingError::InsufficientSeats { available });
        }

        let allocation = self
            .inventory
            .allocate(cmd.trip_id, cmd.seats)
            .await
            .inspect_err(|e| {
                metrics::counter!("booking_rejected_total").increment(1);
                tracing::info!(error = %e, "booking rejected by schedule service");
            })?;
        tracing::info!(
            seats_available = allocation.seats_available,
            "seats allocated"
        );

        // The remote mutation is committed; record it locally.
        let reservation = Reservation::booked(cmd.trip_id, passenger_name, cmd.seats);
        match self.reservations.create(reservation).await {
            Ok(created) => {
                metrics::counter!("booking_completed").increment(1);
                metrics::histogram!("booking_duration_seconds")
                    .record(booking_start.elapsed().as_secs_f64());
                tracing::info!(reservation_id = %created.id, "reservation booked");
                Ok(created)
            }
            Err(store_err) => {
                // Seats are held with no record to show for them. Undo the
                // allocation; the clamped release makes a duplicate attempt
                // harmless if this one also times out.
                match self.inventory.release(cmd.trip_id, cmd.seats).await {
                    Ok(release) => tracing::warn!(
                        released = release.released,
                        "reservation write failed, allocation compensated"
                    ),
                    Err(release_err) => tracing::error!(
                        error = %release_err,
                        seats = cmd.seats,
                        "reservation write failed and compensation failed, seats remain held"
                    ),
                }
                metrics::counter!("booking_failed").increment(1);
                Err(store_err.into())
            }
        }
    }

    /// Cancels a reservation, returning its seats to the trip.
    ///
    /// Cancelling an already-cancelled reservation returns the record
    /// unchanged without issuing another release.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_reservation(&self, reservation_id: ReservationId) -> Result<Reservation> {
        metrics::counter!("cancellation_attempts_total").increment(1);

        let existing = self
            .reservations
            .get(reservation_id)
            .await?
            .ok_or(BookingError::ReservationNotFound(reservation_id))?;

        if existing.is_cancelled() {
            tracing::debug!("already cancelled, nothing to release");
            return Ok(existing);
        }

        // The compensating action. On failure the reservation stays
        // Booked; cancellation is never reported complete before the
        // seats are actually back.
        let release = self
            .inventory
            .release(existing.trip_id, existing.seats_booked)
            .await
            .inspect_err(|e| {
                tracing::warn!(error = %e, "release failed, reservation stays booked");
            })?;
        tracing::info!(
            released = release.released,
            seats_available = release.seats_available,
            "seats released"
        );

        match self
            .reservations
            .update_status(reservation_id, ReservationStatus::Cancelled)
            .await
        {
            Ok(updated) => {
                metrics::counter!("cancellation_completed").increment(1);
                Ok(updated)
            }
            Err(store_err) => {
                // Seats are back but the record still says Booked. The
                // clamp makes a retried cancel safe: its release applies
                // nothing and the status update runs again.
                tracing::error!(
                    error = %store_err,
                    "seats released but status update failed, retry the cancellation"
                );
                Err(store_err.into())
            }
        }
    }

    /// Returns a reservation by ID.
    pub async fn get_reservation(&self, reservation_id: ReservationId) -> Result<Reservation> {
        self.reservations
            .get(reservation_id)
            .await?
            .ok_or(BookingError::ReservationNotFound(reservation_id))
    }

    /// Returns all reservations, newest first.
    pub async fn list_reservations(&self) -> Result<Vec<Reservation>> {
        Ok(self.reservations.list().await?)
    }
}
