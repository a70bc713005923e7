//! Schedule and seat inventory authority.
//!
//! This crate owns routes, trips, and the per-trip seat counters. Seat
//! counters are mutated only through [`ScheduleStore::allocate`] and
//! [`ScheduleStore::release`], which execute inside a per-trip critical
//! section so that concurrent mutators of the same trip are strictly
//! serialized. Operations on different trips proceed independently.

pub mod error;
pub mod route;
pub mod store;
pub mod trip;

pub use error::InventoryError;
pub use route::Route;
pub use store::ScheduleStore;
pub use trip::Trip;
