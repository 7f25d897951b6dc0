use serde::{Deserialize, Serialize};

/// A (lat, lon) pair in degrees
///
/// No normalization or range checks are applied. Containment math treats the
/// pair as planar x/y, not as a point on a sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl From<Coordinate> for geo::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo::coord! { x: c.lon, y: c.lat }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_axis_order() {
        let c: geo::Coord<f64> = Coordinate::new(37.77, -122.42).into();
        assert_eq!(c.x, -122.42);
        assert_eq!(c.y, 37.77);
    }

    #[test]
    fn test_deserialize() {
        let c: Coordinate = serde_json::from_str(r#"{"lat": 10.5, "lon": -3.0}"#).unwrap();
        assert_eq!(c, Coordinate::new(10.5, -3.0));
    }
}
