//! Vehicle state storage
//!
//! The engine only talks to a [`VehicleStore`], so backings can be swapped
//! without touching the transition logic. Every backing must make `update`
//! atomic from a reader's point of view; no read-modify-write primitive is
//! offered.

pub mod memory;
pub mod sharded;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::VehicleStatus;

pub use memory::InMemoryStore;
pub use sharded::ShardedStore;

pub trait VehicleStore: Send + Sync {
    /// Insert or overwrite the record for `id`
    fn update(&self, id: &str, zone_id: &str, seen_at: DateTime<Utc>);

    /// Current record for `id`, `None` if the vehicle has never reported
    fn get(&self, id: &str) -> Option<VehicleStatus>;

    /// Number of vehicles with a record
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: VehicleStore + ?Sized> VehicleStore for Arc<T> {
    fn update(&self, id: &str, zone_id: &str, seen_at: DateTime<Utc>) {
        (**self).update(id, zone_id, seen_at)
    }

    fn get(&self, id: &str) -> Option<VehicleStatus> {
        (**self).get(id)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// Store implementation selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Single map behind a reader-writer lock
    #[default]
    Memory,
    /// Sharded concurrent map
    Sharded,
}

impl StoreBackend {
    pub fn build(self) -> Arc<dyn VehicleStore> {
        match self {
            StoreBackend::Memory => Arc::new(InMemoryStore::new()),
            StoreBackend::Sharded => Arc::new(ShardedStore::new()),
        }
    }
}
