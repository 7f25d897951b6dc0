use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last known zone of a vehicle
///
/// An empty `current_zone_id` means the vehicle was outside every zone at its
/// last ping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleStatus {
    pub vehicle_id: String,
    pub current_zone_id: String,
    pub last_seen: DateTime<Utc>,
}

impl VehicleStatus {
    pub fn new(
        vehicle_id: impl Into<String>,
        current_zone_id: impl Into<String>,
        last_seen: DateTime<Utc>,
    ) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            current_zone_id: current_zone_id.into(),
            last_seen,
        }
    }

    pub fn is_outside(&self) -> bool {
        self.current_zone_id.is_empty()
    }

    /// Current zone, `None` when outside
    pub fn zone(&self) -> Option<&str> {
        (!self.is_outside()).then_some(self.current_zone_id.as_str())
    }
}
