use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Coordinate;

/// A single location ping from a vehicle
///
/// `timestamp` is producer-supplied epoch seconds and is not checked against
/// the wall clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEvent {
    pub vehicle_id: String,
    pub lat: f64,
    pub lon: f64,
    pub timestamp: i64,
}

#[derive(Debug, Error, PartialEq)]
pub enum EventError {
    #[error("missing vehicle_id")]
    MissingVehicleId,
    #[error("coordinates must be finite numbers (lat={lat}, lon={lon})")]
    NonFiniteCoordinate { lat: f64, lon: f64 },
}

impl LocationEvent {
    pub fn new(vehicle_id: impl Into<String>, lat: f64, lon: f64, timestamp: i64) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            lat,
            lon,
            timestamp,
        }
    }

    pub fn point(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }

    /// Event time as an absolute instant
    ///
    /// Epoch seconds outside chrono's representable range saturate to its
    /// minimum or maximum instant.
    pub fn seen_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.timestamp, 0).unwrap_or(if self.timestamp < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
    }

    /// Structural checks performed at the ingest boundary
    pub fn validate(&self) -> Result<(), EventError> {
        if self.vehicle_id.is_empty() {
            return Err(EventError::MissingVehicleId);
        }
        if !self.point().is_finite() {
            return Err(EventError::NonFiniteCoordinate {
                lat: self.lat,
                lon: self.lon,
            });
        }
        Ok(())
    }
}
