//! HTTP client for the schedule service's seat operations.

use std::time::Duration;

use async_trait::async_trait;
use common::{SeatAllocation, SeatRelease, TripAvailability, TripId};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};
use crate::inventory::InventoryApi;

/// Default timeout for every request to the schedule service.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
struct SeatCountBody {
    count: u32,
}

#[derive(Deserialize)]
struct ConflictBody {
    available: u32,
}

/// Client for the schedule service over HTTP.
///
/// Structured rejections (404, 409) are decoded into the matching
/// [`BookingError`] variants; everything else, including timeouts, is
/// reported as `Upstream`. A timed-out request may still have committed on
/// the remote side, so the caller must not assume either outcome.
#[derive(Clone)]
pub struct HttpInventoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInventoryClient {
    /// Creates a client with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BookingError::Upstream(e.to_string()))?;
        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn trip_url(&self, trip_id: TripId, suffix: &str) -> String {
        format!("{}/trips/{}/{}", self.base_url, trip_id, suffix)
    }

    async fn post_seats<T: serde::de::DeserializeOwned>(
        &self,
        trip_id: TripId,
        suffix: &str,
        count: u32,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.trip_url(trip_id, suffix))
            .json(&SeatCountBody { count })
            .send()
            .await
            .map_err(|e| BookingError::Upstream(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<T>()
                .await
                .map_err(|e| BookingError::Upstream(e.to_string())),
            StatusCode::NOT_FOUND => Err(BookingError::TripNotFound(trip_id)),
            StatusCode::CONFLICT => {
                let body = response
                    .json::<ConflictBody>()
                    .await
                    .map_err(|e| BookingError::Upstream(e.to_string()))?;
                Err(BookingError::InsufficientSeats {
                    available: body.available,
                })
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(BookingError::Upstream(format!(
                    "unexpected status {status}: {body}"
                )))
            }
        }
    }
}

#[async_trait]
impl InventoryApi for HttpInventoryClient {
    async fn availability(&self, trip_id: TripId) -> Result<u32> {
        let response = self
            .client
            .get(self.trip_url(trip_id, "availability"))
            .send()
            .await
            .map_err(|e| BookingError::Upstream(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let body = response
                    .json::<TripAvailability>()
                    .await
                    .map_err(|e| BookingError::Upstream(e.to_string()))?;
                Ok(body.seats_available)
            }
            StatusCode::NOT_FOUND => Err(BookingError::TripNotFound(trip_id)),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(BookingError::Upstream(format!(
                    "unexpected status {status}: {body}"
                )))
            }
        }
    }

    async fn allocate(&self, trip_id: TripId, count: u32) -> Result<SeatAllocation> {
        self.post_seats(trip_id, "allocate", count).await
    }

    async fn release(&self, trip_id: TripId, count: u32) -> Result<SeatRelease> {
        self.post_seats(trip_id, "release", count).await
    }
}
