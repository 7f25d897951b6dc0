use geo::{BoundingRect, LineString, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

use super::Coordinate;
use crate::geometry;

/// A named polygonal region
///
/// The boundary is an ordered vertex list that is always treated as closed.
/// Zones are immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ZoneDef")]
pub struct Zone {
    pub id: String,
    pub name: String,
    boundary: Vec<Coordinate>,
    #[serde(skip)]
    bounds: Option<Rect<f64>>,
}

#[derive(Deserialize)]
struct ZoneDef {
    id: String,
    #[serde(default)]
    name: String,
    boundary: Vec<Coordinate>,
}

impl From<ZoneDef> for Zone {
    fn from(def: ZoneDef) -> Self {
        Zone::new(def.id, def.name, def.boundary)
    }
}

impl Zone {
    pub fn new(id: impl Into<String>, name: impl Into<String>, boundary: Vec<Coordinate>) -> Self {
        let ring: LineString<f64> = boundary.iter().copied().map(geo::Coord::from).collect();
        let bounds = ring.bounding_rect();

        Self {
            id: id.into(),
            name: name.into(),
            boundary,
            bounds,
        }
    }

    pub fn boundary(&self) -> &[Coordinate] {
        &self.boundary
    }

    /// Bounding rectangle of the boundary (x = lon, y = lat), `None` when empty
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.bounds
    }

    /// Fewer than three vertices cannot enclose any area
    pub fn is_degenerate(&self) -> bool {
        self.boundary.len() < 3
    }

    /// Whether this zone's boundary contains `point`
    ///
    /// Points strictly above or below the boundary's latitude extent are
    /// rejected up front: no edge can straddle their latitude, so the ray cast
    /// would count zero crossings anyway.
    pub fn contains(&self, point: Coordinate) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        if point.lat < bounds.min().y || point.lat > bounds.max().y {
            return false;
        }
        geometry::contains(point, &self.boundary)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ZoneError {
    #[error("zone at position {index} has an empty id")]
    EmptyId { index: usize },
    #[error("duplicate zone id: {0}")]
    DuplicateId(String),
}

/// Ordered, immutable list of zones
///
/// Order is significant: when zones overlap, the earliest listed zone wins.
/// Cloning is cheap and every clone shares the same zones.
#[derive(Debug, Clone)]
pub struct ZoneSet {
    zones: Arc<[Zone]>,
}

impl ZoneSet {
    pub fn new(zones: Vec<Zone>) -> Result<Self, ZoneError> {
        let mut seen = HashSet::new();
        for (index, zone) in zones.iter().enumerate() {
            if zone.id.is_empty() {
                return Err(ZoneError::EmptyId { index });
            }
            if !seen.insert(zone.id.as_str()) {
                return Err(ZoneError::DuplicateId(zone.id.clone()));
            }
            if zone.is_degenerate() {
                tracing::warn!(
                    zone = %zone.id,
                    vertices = zone.boundary.len(),
                    "zone boundary has fewer than 3 vertices and will never match"
                );
            }
        }

        Ok(Self {
            zones: zones.into(),
        })
    }

    /// First zone, in configured order, whose boundary contains `point`
    pub fn resolve(&self, point: Coordinate) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.contains(point))
    }

    pub fn get(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
