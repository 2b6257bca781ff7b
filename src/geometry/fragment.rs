use geo::{Area, LineString, Polygon};

/// Planar area of a fragment in squared source units, holes subtracted.
pub fn fragment_area(polygon: &Polygon<f64>) -> f64 {
    polygon.unsigned_area()
}

/// Whether a fragment is large enough to render. The cutoff is inclusive:
/// a fragment exactly at `min_area` is kept.
pub fn is_significant(area: f64, min_area: f64) -> bool {
    area >= min_area
}

/// Flatten a ring into `lon, lat, height` triples, dropping the closing
/// duplicate of the first point. Heights are always 0.
pub fn flatten_ring(ring: &LineString<f64>) -> Vec<f64> {
    let n = if ring.is_closed() { ring.0.len().saturating_sub(1) } else { ring.0.len() };
    ring.0[..n].iter()
        .flat_map(|c| [c.x, c.y, 0.0])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, polygon};

    #[test]
    fn flatten_drops_closing_point() {
        let ring = line_string![(x: 150.0, y: -33.0), (x: 151.0, y: -33.0), (x: 151.0, y: -34.0), (x: 150.0, y: -33.0)];
        let flat = flatten_ring(&ring);
        assert_eq!(flat.len(), (ring.0.len() - 1) * 3);
        assert_eq!(flat, vec![150.0, -33.0, 0.0, 151.0, -33.0, 0.0, 151.0, -34.0, 0.0]);
    }

    #[test]
    fn flatten_keeps_open_rings_whole() {
        let ring = line_string![(x: 1.0, y: 2.0), (x: 3.0, y: 4.0)];
        assert_eq!(flatten_ring(&ring), vec![1.0, 2.0, 0.0, 3.0, 4.0, 0.0]);
        assert!(flatten_ring(&LineString::new(vec![])).is_empty());
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(is_significant(0.0028, 0.0028));
        assert!(is_significant(0.5, 0.0028));
        assert!(!is_significant(0.0027, 0.0028));
    }

    #[test]
    fn area_subtracts_holes() {
        let square = polygon!(
            exterior: [(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0)],
            interiors: [[(x: 0.5, y: 0.5), (x: 1.5, y: 0.5), (x: 1.5, y: 1.5), (x: 0.5, y: 1.5)]],
        );
        assert!((fragment_area(&square) - 3.0).abs() < 1e-12);
    }
}
