use std::io::Write;

use anyhow::Result;
use geo::Polygon;

use crate::color::{Rgba, party_color};
use crate::config::SceneConfig;
use crate::geometry::{DivisionFeature, Geometry, flatten_ring, fragment_area, is_significant};
use crate::results::{Dated, ElectionResult, ResultStore, TppRecord, two_party_share};

use super::packet::{
    Clock, DivisionPacket, DocumentPacket, FragmentPacket, Material, PolygonGraphics, Positions,
    RgbaValue, SampledColor, SampledNumber, SolidColor,
};
use super::writer::CzmlWriter;

const CZML_VERSION: &str = "1.0";
const OUTLINE_COLOR: [u8; 4] = [0, 0, 0, 255];

/// Counts from one document run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Divisions with at least one fragment packet.
    pub divisions_written: usize,
    /// Divisions whose parts all fell below the area threshold. Their
    /// parent packet is still written, with no fragments under it.
    pub divisions_empty: usize,
    /// Features with no matching election results.
    pub divisions_skipped: usize,
    pub fragments_written: usize,
    /// Multi-polygon parts below the area threshold.
    pub fragments_dropped: usize,
    /// Packets in the document, header included.
    pub packets: usize,
}

/// Turns division features plus a loaded `ResultStore` into one CZML document.
pub struct DocumentWriter<'a> {
    scene: &'a SceneConfig,
    store: &'a ResultStore,
    verbose: u8,
}

/// Stable packet id of a division.
fn division_packet_id(name: &str) -> String {
    format!("Division/{name}")
}

impl<'a> DocumentWriter<'a> {
    pub fn new(scene: &'a SceneConfig, store: &'a ResultStore) -> Self {
        Self { scene, store, verbose: 0 }
    }

    pub fn with_verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    /// Stream the whole document into `sink`: header, then the packets of
    /// every feature in source order, then the closing bracket.
    pub fn write<W, I>(&self, features: I, sink: W) -> Result<(W, WriteSummary)>
    where
        W: Write,
        I: IntoIterator<Item = DivisionFeature>,
    {
        let mut czml = CzmlWriter::new(sink, self.scene.options.pretty)?;
        czml.write_packet(&self.header_packet())?;

        let mut summary = WriteSummary::default();
        for feature in features {
            self.write_division(&mut czml, &feature, &mut summary)?;
        }

        summary.packets = czml.packets();
        Ok((czml.finish()?, summary))
    }

    fn header_packet(&self) -> DocumentPacket {
        DocumentPacket {
            id: "document",
            version: CZML_VERSION,
            clock: Clock {
                interval: format!("{}/{}", self.scene.start_instant(), self.scene.end_instant()),
                current_time: self.scene.start_instant(),
                multiplier: self.scene.options.multiplier,
                range: "LOOP_STOP",
                step: "SYSTEM_CLOCK_MULTIPLIER",
            },
        }
    }

    /// Parent packet plus one packet per rendered fragment. Divisions without
    /// results are skipped.
    fn write_division<W: Write>(&self, czml: &mut CzmlWriter<W>, feature: &DivisionFeature, summary: &mut WriteSummary) -> Result<()> {
        let history = self.store.results_for_division(&feature.name);
        if history.is_empty() {
            if self.verbose > 1 { eprintln!("[czml] no results for division {:?}, skipping", feature.name); }
            summary.divisions_skipped += 1;
            return Ok(());
        }
        let tpp = self.store.tpp_for_division(&feature.name);
        if self.verbose > 1 {
            eprintln!("[czml] writing division {} ({} results, {} tpp rows, {} parts)",
                feature.name, history.len(), tpp.len(), feature.geometry.num_parts());
        }

        let division_id = division_packet_id(&feature.name);
        czml.write_packet(&DivisionPacket { id: division_id.clone(), name: feature.name.clone() })?;

        let fill = SampledColor {
            epoch: self.scene.start_instant(),
            rgba: color_intervals(history, self.scene),
        };
        let extrusion = self.scene.options.tpp_extrusion
            .map(|multiplier| height_intervals(tpp, self.scene, multiplier))
            .filter(|number| !number.is_empty())
            .map(|number| SampledNumber { epoch: self.scene.start_instant(), number });

        let fragments: Vec<(usize, &Polygon<f64>)> = match &feature.geometry {
            // A lone polygon is always rendered.
            Geometry::Polygon(polygon) => vec![(0, polygon)],
            Geometry::MultiPolygon(mp) => mp.0.iter().enumerate()
                .filter(|(_, polygon)| is_significant(fragment_area(polygon), self.scene.options.min_fragment_area))
                .collect(),
        };
        summary.fragments_dropped += feature.geometry.num_parts() - fragments.len();
        let all_dropped = fragments.is_empty();

        for (index, polygon) in fragments {
            czml.write_packet(&FragmentPacket {
                id: format!("{division_id}/{index}"),
                name: self.scene.options.fragment_label.clone(),
                description: feature.name.clone(),
                parent: division_id.clone(),
                polygon: PolygonGraphics {
                    outline: true,
                    outline_color: RgbaValue { rgba: OUTLINE_COLOR },
                    material: Material { solid_color: SolidColor { color: fill.clone() } },
                    extruded_height: extrusion.clone(),
                    positions: Positions { cartographic_degrees: flatten_ring(polygon.exterior()) },
                },
            })?;
            summary.fragments_written += 1;
        }

        if all_dropped {
            if self.verbose > 1 { eprintln!("[czml] every part of {} is below the area threshold", feature.name); }
            summary.divisions_empty += 1;
        } else {
            summary.divisions_written += 1;
        }
        Ok(())
    }
}

/// Append `(offset, value)`, replacing the last sample if it has the same offset.
fn push_sample<T>(samples: &mut Vec<(i64, T)>, offset: i64, value: T) {
    if samples.last().is_some_and(|last| last.0 == offset) {
        samples.pop();
    }
    samples.push((offset, value));
}

/// Fill color intervals for a division, flattened to `[offset, r, g, b, a, ...]`.
///
/// `history` must be sorted by date. Snapshots on or before the scene start
/// set the color at offset 0; if there are none the division did not exist
/// yet and offset 0 is white. Snapshots sharing a date keep the last one.
pub fn color_intervals(history: &[Dated<ElectionResult>], scene: &SceneConfig) -> Vec<i64> {
    let alpha = scene.options.alpha;
    let mut samples: Vec<(i64, Rgba)> = Vec::with_capacity(history.len() + 1);
    for dated in history {
        let offset = scene.offset_seconds(dated.date).max(0);
        push_sample(&mut samples, offset, party_color(&dated.record.party, alpha));
    }
    if samples.first().is_none_or(|&(offset, _)| offset != 0) {
        samples.insert(0, (0, Rgba::unknown(alpha)));
    }

    samples.into_iter()
        .flat_map(|(offset, color)| {
            let [r, g, b, a] = color.components();
            [offset, r.into(), g.into(), b.into(), a.into()]
        })
        .collect()
}

/// Extrusion height intervals, flattened to `[offset, height, ...]`.
///
/// Rows sharing a date (polling booths) are summed before the winning
/// share is taken. Height is 0 before the first TPP snapshot. Empty when
/// no snapshot recorded any votes.
pub fn height_intervals(tpp: &[Dated<TppRecord>], scene: &SceneConfig, multiplier: f64) -> Vec<f64> {
    let mut samples: Vec<(i64, f64)> = Vec::new();
    for snapshot in tpp.chunk_by(|a, b| a.date == b.date) {
        let (labor, coalition) = snapshot.iter()
            .fold((0, 0), |(l, c), dated| (l + dated.record.labor_votes, c + dated.record.coalition_votes));
        let Some(share) = two_party_share(labor, coalition) else { continue };
        push_sample(&mut samples, scene.offset_seconds(snapshot[0].date).max(0), share * multiplier);
    }
    if samples.is_empty() { return Vec::new() }
    if samples[0].0 != 0 {
        samples.insert(0, (0, 0.0));
    }

    samples.into_iter()
        .flat_map(|(offset, height)| [offset as f64, height])
        .collect()
}
