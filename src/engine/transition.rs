use serde::Serialize;
use std::fmt;

/// A change in a vehicle's resolved zone between two consecutive pings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    Enter {
        vehicle_id: String,
        zone_id: String,
    },
    Exit {
        vehicle_id: String,
        zone_id: String,
    },
    Cross {
        vehicle_id: String,
        from: String,
        to: String,
    },
}

impl Transition {
    /// Classify a move from `previous` to `resolved` (`None` = outside all zones)
    ///
    /// Returns `None` when nothing changed.
    pub fn classify(
        vehicle_id: &str,
        previous: Option<&str>,
        resolved: Option<&str>,
    ) -> Option<Transition> {
        let vehicle_id = vehicle_id.to_string();
        match (previous, resolved) {
            (None, None) => None,
            (Some(prev), Some(next)) if prev == next => None,
            (None, Some(zone)) => Some(Transition::Enter {
                vehicle_id,
                zone_id: zone.to_string(),
            }),
            (Some(zone), None) => Some(Transition::Exit {
                vehicle_id,
                zone_id: zone.to_string(),
            }),
            (Some(from), Some(to)) => Some(Transition::Cross {
                vehicle_id,
                from: from.to_string(),
                to: to.to_string(),
            }),
        }
    }

    pub fn vehicle_id(&self) -> &str {
        match self {
            Transition::Enter { vehicle_id, .. }
            | Transition::Exit { vehicle_id, .. }
            | Transition::Cross { vehicle_id, .. } => vehicle_id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Transition::Enter { .. } => "ENTER",
            Transition::Exit { .. } => "EXIT",
            Transition::Cross { .. } => "CROSS",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Enter {
                vehicle_id,
                zone_id,
            } => write!(f, "vehicle {vehicle_id} ENTERED zone {zone_id}"),
            Transition::Exit {
                vehicle_id,
                zone_id,
            } => write!(f, "vehicle {vehicle_id} EXITED zone {zone_id}"),
            Transition::Cross {
                vehicle_id,
                from,
                to,
            } => write!(f, "vehicle {vehicle_id} CROSSED from {from} to {to}"),
        }
    }
}
