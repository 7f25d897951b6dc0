//! Per-vehicle zone tracking
//!
//! [`GeofenceEngine::process_event`] resolves a ping to the first containing
//! zone, compares it with the vehicle's stored zone and records the result.
//!
//! The read of the previous zone and the write of the new one are two separate
//! store calls. Two pings for the same vehicle processed at the same time can
//! both see the same stale zone, which duplicates or drops a transition and
//! leaves whichever write landed last in the store. Callers that need
//! per-vehicle ordering must serialize a vehicle's events themselves (the
//! replay lanes do this).

pub mod sink;
pub mod transition;

use std::sync::Arc;

use crate::domain::{LocationEvent, VehicleStatus, ZoneSet};
use crate::store::VehicleStore;

pub use sink::{LogSink, MemorySink, TransitionSink};
pub use transition::Transition;

pub struct GeofenceEngine {
    zones: ZoneSet,
    store: Arc<dyn VehicleStore>,
}

impl GeofenceEngine {
    pub fn new(zones: ZoneSet, store: Arc<dyn VehicleStore>) -> Self {
        Self { zones, store }
    }

    /// Evaluate one ping and record the vehicle's new zone
    ///
    /// Returns the transition caused by this ping, if any. The store is
    /// written on every call so `last_seen` always tracks the latest event.
    /// The event is assumed to be structurally valid.
    pub fn process_event(&self, event: &LocationEvent) -> Option<Transition> {
        let resolved = self.zones.resolve(event.point()).map(|zone| zone.id.as_str());

        let previous = self.store.get(&event.vehicle_id);
        let previous_zone = previous.as_ref().and_then(VehicleStatus::zone);

        let transition = Transition::classify(&event.vehicle_id, previous_zone, resolved);

        tracing::debug!(
            vehicle = %event.vehicle_id,
            lat = event.lat,
            lon = event.lon,
            previous = previous_zone.unwrap_or(""),
            resolved = resolved.unwrap_or(""),
            "processed location event"
        );

        self.store
            .update(&event.vehicle_id, resolved.unwrap_or(""), event.seen_at());

        transition
    }

    /// Last known status of a vehicle, `None` if it has never reported
    pub fn status(&self, vehicle_id: &str) -> Option<VehicleStatus> {
        self.store.get(vehicle_id)
    }

    pub fn zones(&self) -> &ZoneSet {
        &self.zones
    }

    pub fn store(&self) -> &Arc<dyn VehicleStore> {
        &self.store
    }
}
