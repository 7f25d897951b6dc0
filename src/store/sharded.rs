use chrono::{DateTime, Utc};
use dashmap::DashMap;

use super::VehicleStore;
use crate::domain::VehicleStatus;

/// Vehicle records in a `DashMap`
///
/// Keys hash to independently locked shards, so writers for different
/// vehicles rarely contend.
#[derive(Debug, Default)]
pub struct ShardedStore {
    data: DashMap<String, VehicleStatus>,
}

impl ShardedStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VehicleStore for ShardedStore {
    fn update(&self, id: &str, zone_id: &str, seen_at: DateTime<Utc>) {
        self.data
            .insert(id.to_string(), VehicleStatus::new(id, zone_id, seen_at));
    }

    fn get(&self, id: &str) -> Option<VehicleStatus> {
        self.data.get(id).map(|entry| entry.value().clone())
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::contract;

    #[test]
    fn test_update_then_get() {
        contract::update_then_get(&ShardedStore::new());
    }

    #[test]
    fn test_overwrite_in_place() {
        contract::overwrite_in_place(&ShardedStore::new());
    }

    #[test]
    fn test_unknown_vehicle() {
        contract::unknown_is_none(&ShardedStore::new());
    }

    #[test]
    fn test_concurrent_distinct_keys() {
        contract::concurrent_distinct_keys(&ShardedStore::new());
    }
}
