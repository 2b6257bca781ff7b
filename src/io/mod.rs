//! Format-specific reading: delimited results files and boundary shapefiles.

mod csv;
mod shp;

pub(crate) use csv::CsvTable;
pub use shp::read_division_features;
