//! Concurrency tests for the seat inventory.

use std::collections::HashSet;

use chrono::Utc;
use futures_util::future::join_all;
use inventory::{InventoryError, ScheduleStore};

async fn store_with_trip(seats_total: u32) -> (ScheduleStore, common::TripId) {
    let store = ScheduleStore::new();
    let route = store.create_route("City A", "City B").await;
    let trip = store
        .create_trip(route.id, Utc::now(), seats_total)
        .await
        .unwrap();
    (store, trip.id)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_allocations_never_oversell() {
    let (store, trip_id) = store_with_trip(40).await;

    let tasks: Vec<_> = (0..40)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.allocate(trip_id, 1).await })
        })
        .collect();

    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    // All 40 succeed with distinct decremented values ending at 0.
    let mut remainders = HashSet::new();
    for result in results {
        let allocation = result.unwrap();
        assert_eq!(allocation.allocated, 1);
        assert!(remainders.insert(allocation.seats_available));
    }
    assert_eq!(remainders.len(), 40);
    assert!(remainders.contains(&0));
    assert_eq!(store.availability(trip_id).await.unwrap(), 0);

    // The 41st allocation is rejected with the current availability.
    let overflow = store.allocate(trip_id, 1).await;
    assert!(matches!(
        overflow,
        Err(InventoryError::InsufficientSeats {
            requested: 1,
            available: 0
        })
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn two_contenders_for_the_last_seat() {
    let (store, trip_id) = store_with_trip(3).await;
    store.allocate(trip_id, 2).await.unwrap();

    let a = {
        let store = store.clone();
        tokio::spawn(async move { store.allocate(trip_id, 1).await })
    };
    let b = {
        let store = store.clone();
        tokio::spawn(async move { store.allocate(trip_id, 1).await })
    };

    let outcomes = [a.await.unwrap(), b.await.unwrap()];
    let successes = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert_eq!(store.availability(trip_id).await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_releases_stay_bounded() {
    let (store, trip_id) = store_with_trip(10).await;
    store.allocate(trip_id, 10).await.unwrap();

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.release(trip_id, 3).await })
        })
        .collect();

    let mut total_released = 0;
    for joined in join_all(tasks).await {
        let release = joined.unwrap().unwrap();
        assert!(release.seats_available <= 10);
        total_released += release.released;
    }

    // Exactly the allocated seats came back, regardless of how many
    // release calls raced.
    assert_eq!(total_released, 10);
    assert_eq!(store.availability(trip_id).await.unwrap(), 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn unrelated_trips_do_not_contend_on_state() {
    let store = ScheduleStore::new();
    let route = store.create_route("City A", "City B").await;
    let t1 = store.create_trip(route.id, Utc::now(), 20).await.unwrap();
    let t2 = store.create_trip(route.id, Utc::now(), 20).await.unwrap();

    let tasks: Vec<_> = (0..40)
        .map(|i| {
            let store = store.clone();
            let trip_id = if i % 2 == 0 { t1.id } else { t2.id };
            tokio::spawn(async move { store.allocate(trip_id, 1).await })
        })
        .collect();

    for joined in join_all(tasks).await {
        joined.unwrap().unwrap();
    }

    assert_eq!(store.availability(t1.id).await.unwrap(), 0);
    assert_eq!(store.availability(t2.id).await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn mixed_allocate_release_preserves_bounds() {
    let (store, trip_id) = store_with_trip(10).await;

    let tasks: Vec<_> = (0..60)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                if i % 2 == 0 {
                    let _ = store.allocate(trip_id, 1).await;
                } else {
                    let _ = store.release(trip_id, 1).await;
                }
            })
        })
        .collect();
    join_all(tasks).await;

    let remaining = store.availability(trip_id).await.unwrap();
    assert!(remaining <= 10);
}
