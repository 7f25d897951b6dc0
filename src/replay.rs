//! Batch replay of recorded location events
//!
//! Events are dealt into worker lanes by vehicle ID, so one vehicle's pings
//! are always processed in input order by a single thread while different
//! vehicles are processed in parallel.

use indicatif::ProgressBar;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::BufRead;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::domain::LocationEvent;
use crate::engine::{GeofenceEngine, TransitionSink};

/// Vehicle ID used by the built-in demo script
pub const DEMO_VEHICLE: &str = "taxi-demo-01";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub processed: usize,
    pub rejected: usize,
    pub transitions: usize,
}

/// Parse JSON-lines input, one event per line
///
/// Blank lines are ignored. Lines that fail to decode or validate are logged
/// and counted, not fatal. Read errors are returned.
pub fn parse_events<R: BufRead>(reader: R) -> std::io::Result<(Vec<LocationEvent>, usize)> {
    let mut events = Vec::new();
    let mut rejected = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parsed = serde_json::from_str::<LocationEvent>(line)
            .map_err(|e| e.to_string())
            .and_then(|event| event.validate().map(|_| event).map_err(|e| e.to_string()));

        match parsed {
            Ok(event) => events.push(event),
            Err(error) => {
                tracing::warn!(line = index + 1, %error, "skipping malformed event");
                rejected += 1;
            }
        }
    }

    Ok((events, rejected))
}

/// Demo walk-through: enter the City Center zone, stay, then leave
pub fn demo_events(start: i64) -> Vec<LocationEvent> {
    vec![
        LocationEvent::new(DEMO_VEHICLE, 15.0, 15.0, start),
        LocationEvent::new(DEMO_VEHICLE, 16.0, 16.0, start + 1),
        LocationEvent::new(DEMO_VEHICLE, 50.0, 50.0, start + 2),
    ]
}

fn lane_for(vehicle_id: &str, lanes: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    vehicle_id.hash(&mut hasher);
    (hasher.finish() % lanes as u64) as usize
}

/// Run `events` through the engine on up to `workers` threads
pub fn replay(
    engine: &GeofenceEngine,
    sink: &dyn TransitionSink,
    events: Vec<LocationEvent>,
    workers: usize,
    progress: Option<&ProgressBar>,
) -> ReplaySummary {
    let workers = workers.max(1);
    let mut lanes: Vec<Vec<LocationEvent>> = vec![Vec::new(); workers];
    for event in events {
        let lane = lane_for(&event.vehicle_id, workers);
        lanes[lane].push(event);
    }

    let processed = AtomicUsize::new(0);
    let transitions = AtomicUsize::new(0);

    thread::scope(|s| {
        for lane in lanes.into_iter().filter(|lane| !lane.is_empty()) {
            let processed = &processed;
            let transitions = &transitions;
            s.spawn(move || {
                for event in &lane {
                    if let Some(t) = engine.process_event(event) {
                        sink.publish(&t);
                        transitions.fetch_add(1, Ordering::Relaxed);
                    }
                    processed.fetch_add(1, Ordering::Relaxed);
                    if let Some(pb) = progress {
                        pb.inc(1);
                    }
                }
            });
        }
    });

    ReplaySummary {
        processed: processed.into_inner(),
        rejected: 0,
        transitions: transitions.into_inner(),
    }
}
