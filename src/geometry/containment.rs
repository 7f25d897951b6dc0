use crate::domain::Coordinate;

/// Ray-casting parity test for a point against a closed polygon
///
/// Walks every edge (vertex[i], vertex[j]) where j is the predecessor of i,
/// wrapping from the last vertex back to index 0, and counts edges that cross
/// the horizontal ray running from the point toward increasing longitude.
/// An edge crosses when exactly one endpoint latitude is strictly above the
/// point and the interpolated crossing longitude is strictly greater than the
/// point's longitude. Odd count means inside.
///
/// The polygon is always treated as closed, whether or not the first and last
/// vertex repeat. Points lying exactly on an edge resolve however the strict
/// comparisons fall; no epsilon is applied. An empty polygon contains nothing.
pub fn contains(point: Coordinate, polygon: &[Coordinate]) -> bool {
    if polygon.is_empty() {
        return false;
    }

    let mut crossings = 0usize;
    let mut j = polygon.len() - 1;

    for (i, a) in polygon.iter().enumerate() {
        let b = polygon[j];

        if (a.lat > point.lat) != (b.lat > point.lat) {
            // Only reached when a.lat != b.lat, so the division is safe
            let crossing_lon = a.lon + (b.lon - a.lon) * (point.lat - a.lat) / (b.lat - a.lat);
            if point.lon < crossing_lon {
                crossings += 1;
            }
        }

        j = i;
    }

    crossings % 2 == 1
}
