//! CZML packet shapes emitted by the document writer.

use serde::Serialize;

/// First packet of every document: identifies it and sets up the clock.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct DocumentPacket {
    pub(crate) id: &'static str,
    pub(crate) version: &'static str,
    pub(crate) clock: Clock,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Clock {
    /// `<start>/<end>` as ISO 8601 instants.
    pub(crate) interval: String,
    pub(crate) current_time: String,
    pub(crate) multiplier: f64,
    pub(crate) range: &'static str,
    pub(crate) step: &'static str,
}

/// Parent packet grouping the fragments of one division.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct DivisionPacket {
    pub(crate) id: String,
    pub(crate) name: String,
}

/// One rendered polygon of a division.
#[derive(Clone, Debug, Serialize)]
pub(crate) struct FragmentPacket {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) parent: String,
    pub(crate) polygon: PolygonGraphics,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PolygonGraphics {
    pub(crate) outline: bool,
    pub(crate) outline_color: RgbaValue,
    pub(crate) material: Material,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) extruded_height: Option<SampledNumber>,
    pub(crate) positions: Positions,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct RgbaValue {
    pub(crate) rgba: [u8; 4],
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Material {
    pub(crate) solid_color: SolidColor,
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct SolidColor {
    pub(crate) color: SampledColor,
}

/// Color that changes over time: `rgba` holds `[offset, r, g, b, a]` groups,
/// offsets in seconds from `epoch`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct SampledColor {
    pub(crate) epoch: String,
    pub(crate) rgba: Vec<i64>,
}

/// Number that changes over time: `number` holds `[offset, value]` pairs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct SampledNumber {
    pub(crate) epoch: String,
    pub(crate) number: Vec<f64>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Positions {
    /// Interleaved `lon, lat, height` triples.
    pub(crate) cartographic_degrees: Vec<f64>,
}
