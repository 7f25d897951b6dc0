use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;

use super::VehicleStore;
use crate::domain::VehicleStatus;

/// Vehicle records in one `HashMap` behind a reader-writer lock
///
/// Readers share the lock; a writer holds it exclusively for a single insert.
/// Records are never evicted.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<HashMap<String, VehicleStatus>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VehicleStore for InMemoryStore {
    fn update(&self, id: &str, zone_id: &str, seen_at: DateTime<Utc>) {
        let status = VehicleStatus::new(id, zone_id, seen_at);
        self.data.write().insert(id.to_string(), status);
    }

    fn get(&self, id: &str) -> Option<VehicleStatus> {
        self.data.read().get(id).cloned()
    }

    fn len(&self) -> usize {
        self.data.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::contract;

    #[test]
    fn test_update_then_get() {
        contract::update_then_get(&InMemoryStore::new());
    }

    #[test]
    fn test_overwrite_in_place() {
        contract::overwrite_in_place(&InMemoryStore::new());
    }

    #[test]
    fn test_unknown_vehicle() {
        contract::unknown_is_none(&InMemoryStore::new());
    }

    #[test]
    fn test_concurrent_distinct_keys() {
        contract::concurrent_distinct_keys(&InMemoryStore::new());
    }
}
