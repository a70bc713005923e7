//! Route model.

use common::RouteId;
use serde::{Deserialize, Serialize};

/// A route between two cities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub origin: String,
    pub destination: String,
}

impl Route {
    /// Creates a new route with a fresh identifier.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            id: RouteId::new(),
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    /// Returns true if the route connects the given origin and destination.
    pub fn connects(&self, origin: &str, destination: &str) -> bool {
        self.origin == origin && self.destination == destination
    }
}
