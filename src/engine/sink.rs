use parking_lot::Mutex;

use super::Transition;

/// Destination for transition notifications
pub trait TransitionSink: Send + Sync {
    fn publish(&self, transition: &Transition);
}

/// Emits each transition as an `info` log event
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl TransitionSink for LogSink {
    fn publish(&self, transition: &Transition) {
        match transition {
            Transition::Enter {
                vehicle_id,
                zone_id,
            } => tracing::info!(vehicle = %vehicle_id, zone = %zone_id, "vehicle entered zone"),
            Transition::Exit {
                vehicle_id,
                zone_id,
            } => tracing::info!(vehicle = %vehicle_id, zone = %zone_id, "vehicle exited zone"),
            Transition::Cross {
                vehicle_id,
                from,
                to,
            } => tracing::info!(vehicle = %vehicle_id, from = %from, to = %to, "vehicle crossed zones"),
        }
    }
}

/// Keeps every published transition in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    transitions: Mutex<Vec<Transition>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Transition> {
        self.transitions.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.transitions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TransitionSink for MemorySink {
    fn publish(&self, transition: &Transition) {
        self.transitions.lock().push(transition.clone());
    }
}
