//! CZML document generation.

mod document;
mod packet;
mod writer;

pub use document::{DocumentWriter, WriteSummary, color_intervals, height_intervals};
