//! Demo data seeding.

use chrono::{DurationRound, TimeDelta, Utc};
use inventory::{InventoryError, ScheduleStore};

/// Seeds the store with demo routes and trips if it is empty.
///
/// Three city pairs, each with trips departing 2, 6, and 10 hours from
/// now (on the hour), 40 seats per trip. A non-empty store is left
/// untouched, so restarts do not duplicate data.
pub async fn seed_if_empty(store: &ScheduleStore) -> Result<(), InventoryError> {
    if store.route_count().await > 0 {
        return Ok(());
    }

    let now = Utc::now()
        .duration_trunc(TimeDelta::hours(1))
        .unwrap_or_else(|_| Utc::now());

    let route_pairs = [
        ("City A", "City B"),
        ("City A", "City C"),
        ("City B", "City C"),
    ];
    for (origin, destination) in route_pairs {
        let route = store.create_route(origin, destination).await;
        for hours in [2, 6, 10] {
            store
                .create_trip(route.id, now + TimeDelta::hours(hours), 40)
                .await?;
        }
    }

    tracing::info!("seeded demo routes and trips");
    Ok(())
}
