#![doc = "Fuses dated election results with division boundaries into a time-dynamic CZML document"]
mod color;
mod common;
mod config;
mod czml;
mod geometry;
mod io;
mod load;
mod results;
mod run;

#[doc(inline)]
pub use color::{DEFAULT_ALPHA, Rgba, party_color};

#[doc(inline)]
pub use config::{RunConfig, SceneConfig, SceneOptions, SnapshotKind, SnapshotSpec};

#[doc(inline)]
pub use czml::{DocumentWriter, WriteSummary, color_intervals, height_intervals};

#[doc(inline)]
pub use geometry::{DivisionFeature, Geometry, flatten_ring, fragment_area, is_significant};

#[doc(inline)]
pub use io::read_division_features;

#[doc(inline)]
pub use load::{SnapshotSummary, load_snapshot, load_snapshots};

#[doc(inline)]
pub use results::{ByElectionResult, Dated, ElectionRecord, ElectionResult, GeneralResult, ResultStore, TppRecord};

#[doc(inline)]
pub use run::{convert, list_parties, write_document};
