//! Division boundary geometry, as read from the feature source.

mod fragment;

use geo::{MultiPolygon, Polygon};

pub use fragment::{flatten_ring, fragment_area, is_significant};

/// A division boundary: either one polygon or several disjoint parts.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl Geometry {
    /// Collapse a one-part multipolygon into a polygon. `None` if there are no parts.
    pub fn from_multipolygon(mut mp: MultiPolygon<f64>) -> Option<Self> {
        match mp.0.len() {
            0 => None,
            1 => mp.0.pop().map(Geometry::Polygon),
            _ => Some(Geometry::MultiPolygon(mp)),
        }
    }

    /// Number of sub-geometries (1 for a single polygon).
    pub fn num_parts(&self) -> usize {
        match self {
            Geometry::Polygon(_) => 1,
            Geometry::MultiPolygon(mp) => mp.0.len(),
        }
    }
}

/// A named division boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct DivisionFeature {
    pub name: String,
    pub geometry: Geometry,
}

impl DivisionFeature {
    pub fn new(name: impl Into<String>, geometry: Geometry) -> Self {
        Self { name: name.into(), geometry }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    #[test]
    fn one_part_collapses_to_polygon() {
        let p = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)];
        assert_eq!(Geometry::from_multipolygon(MultiPolygon(vec![p.clone()])), Some(Geometry::Polygon(p.clone())));
        assert_eq!(Geometry::from_multipolygon(MultiPolygon(vec![])), None);

        let multi = Geometry::from_multipolygon(MultiPolygon(vec![p.clone(), p])).unwrap();
        assert_eq!(multi.num_parts(), 2);
    }
}
