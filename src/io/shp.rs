//! Shapefile reading operations.

use std::path::Path;

use anyhow::{Context, Result, bail};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use shapefile::{self as shp, dbase::{FieldValue, Record}, Shape};

use crate::geometry::{DivisionFeature, Geometry};

/// Reads every named division boundary from a `.shp` file (and its `.dbf`),
/// in file order. Shapes with no polygon parts are skipped.
pub fn read_division_features(path: &Path, name_field: &str, verbose: u8) -> Result<Vec<DivisionFeature>> {
    let mut reader = shp::Reader::from_path(path)
        .with_context(|| format!("[io::shp] Failed to open shapefile: {}", path.display()))?;

    let mut features = Vec::new();
    for (i, item) in reader.iter_shapes_and_records().enumerate() {
        let (shape, record) = item
            .with_context(|| format!("[io::shp] Error reading shape+record {} of {}", i, path.display()))?;
        let name = division_name(&record, name_field)
            .with_context(|| format!("[io::shp] Feature {} of {}", i, path.display()))?;

        match shape_to_geometry(shape) {
            Some(geometry) => features.push(DivisionFeature { name, geometry }),
            None => if verbose > 0 { eprintln!("[io::shp] skipping feature {name:?}: no polygon parts") },
        }
    }

    if verbose > 0 { eprintln!("[io::shp] read {} division features from {}", features.len(), path.display()); }
    Ok(features)
}

/// Get the trimmed value of a character field from a Record.
fn division_name(record: &Record, field: &str) -> Result<String> {
    match record.get(field) {
        Some(FieldValue::Character(Some(s))) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => bail!("missing or invalid character field: {}", field),
    }
}

/// Convert a polygon shape into a `Geometry`, or `None` for other shape kinds.
pub(crate) fn shape_to_geometry(shape: Shape) -> Option<Geometry> {
    let mp = match shape {
        Shape::Polygon(p) => rings_to_multipolygon(p.rings(), |pt| Coord { x: pt.x, y: pt.y }),
        Shape::PolygonM(p) => rings_to_multipolygon(p.rings(), |pt| Coord { x: pt.x, y: pt.y }),
        Shape::PolygonZ(p) => rings_to_multipolygon(p.rings(), |pt| Coord { x: pt.x, y: pt.y }),
        _ => return None,
    };
    Geometry::from_multipolygon(mp)
}

/// Group shapefile rings into polygons: each outer ring owns the inner
/// rings that follow it. An inner ring seen before any outer ring is
/// taken as the exterior, so a lone ring wound the wrong way still counts.
fn rings_to_multipolygon<P>(rings: &[shp::PolygonRing<P>], xy: impl Fn(&P) -> Coord<f64>) -> MultiPolygon<f64> {
    /// Ensure first and last are the same for geo::LineString coords
    fn ensure_closed(coords: &mut Vec<Coord<f64>>) {
        if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
            if first != last { coords.push(first) }
        }
    }

    let mut polys: Vec<Polygon<f64>> = Vec::new();
    let mut current_exterior: Option<LineString<f64>> = None;
    let mut current_holes: Vec<LineString<f64>> = Vec::new();

    for ring in rings {
        let (points, is_exterior) = match ring {
            shp::PolygonRing::Outer(points) => (points, true),
            shp::PolygonRing::Inner(points) => (points, false),
        };
        let mut coords: Vec<Coord<f64>> = points.iter().map(&xy).collect();
        ensure_closed(&mut coords);
        let ls = LineString(coords);

        if is_exterior {
            // flush previous polygon
            if let Some(ext) = current_exterior.take() {
                polys.push(Polygon::new(ext, std::mem::take(&mut current_holes)));
            }
            current_exterior = Some(ls);
        } else if current_exterior.is_some() {
            current_holes.push(ls);
        } else {
            current_exterior = Some(ls);
        }
    }
    if let Some(ext) = current_exterior {
        polys.push(Polygon::new(ext, current_holes));
    }

    MultiPolygon(polys)
}
