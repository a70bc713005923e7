//! Trip model.

use chrono::{DateTime, Utc};
use common::{RouteId, TripId};
use serde::{Deserialize, Serialize};

/// A scheduled trip on a route.
///
/// Invariant: `0 <= seats_available <= seats_total` at all times.
/// `seats_available` is mutated only through the store's allocate/release
/// operations, inside the per-trip critical section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,
    pub route_id: RouteId,
    pub departure_time: DateTime<Utc>,
    /// Total capacity, fixed at creation.
    pub seats_total: u32,
    pub seats_available: u32,
    pub created_at: DateTime<Utc>,
}

impl Trip {
    /// Creates a new trip with all seats available.
    pub fn new(route_id: RouteId, departure_time: DateTime<Utc>, seats_total: u32) -> Self {
        Self {
            id: TripId::new(),
            route_id,
            departure_time,
            seats_total,
            seats_available: seats_total,
            created_at: Utc::now(),
        }
    }

    /// Returns true if the trip departs on the given calendar day (UTC).
    pub fn departs_on(&self, date: chrono::NaiveDate) -> bool {
        self.departure_time.date_naive() == date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trip_starts_fully_available() {
        let trip = Trip::new(RouteId::new(), Utc::now(), 40);
        assert_eq!(trip.seats_total, 40);
        assert_eq!(trip.seats_available, 40);
    }

    #[test]
    fn departs_on_compares_calendar_day() {
        let departure = "2026-08-10T14:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let trip = Trip::new(RouteId::new(), departure, 10);
        assert!(trip.departs_on("2026-08-10".parse().unwrap()));
        assert!(!trip.departs_on("2026-08-11".parse().unwrap()));
    }

    #[test]
    fn serialization_roundtrip() {
        let trip = Trip::new(RouteId::new(), Utc::now(), 12);
        let json = serde_json::to_string(&trip).unwrap();
        let deserialized: Trip = serde_json::from_str(&json).unwrap();
        assert_eq!(trip, deserialized);
    }
}
