//! The batch pipeline: load every input, then write one document.

use std::{io::BufWriter, path::Path};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::color::{Rgba, party_color};
use crate::common::{ensure_dir_exists, parent_dir};
use crate::config::{RunConfig, SceneConfig};
use crate::czml::{DocumentWriter, WriteSummary};
use crate::geometry::DivisionFeature;
use crate::io::read_division_features;
use crate::load::load_snapshots;
use crate::results::ResultStore;

/// Run one full conversion. All inputs are read before the output is
/// opened, so a load error never leaves a document behind.
pub fn convert(config: &RunConfig, verbose: u8) -> Result<WriteSummary> {
    let scene = config.scene()?;
    if verbose > 0 {
        eprintln!("[run] scene {} -> {}, {} snapshots", scene.start, scene.end, config.snapshots.len());
    }

    let store = load_snapshots(&config.snapshots, verbose)?;
    let features = read_division_features(&config.boundaries, &config.name_field, verbose)?;

    if verbose > 0 { eprintln!("[run] writing {}", config.output.display()); }
    let summary = write_document(&scene, &store, features, &config.output, verbose)?;

    if verbose > 0 {
        eprintln!("[run] {} divisions written, {} without results, {} with every part below area threshold; {} fragments written, {} dropped",
            summary.divisions_written, summary.divisions_skipped, summary.divisions_empty, summary.fragments_written, summary.fragments_dropped);
    }
    Ok(summary)
}

/// Write the document for `features` to `output`.
///
/// The document is streamed into a temporary file beside `output` and moved
/// into place only once complete; on failure `output` is left untouched.
pub fn write_document<I>(scene: &SceneConfig, store: &ResultStore, features: I, output: &Path, verbose: u8) -> Result<WriteSummary>
where
    I: IntoIterator<Item = DivisionFeature>,
{
    let dir = parent_dir(output);
    ensure_dir_exists(dir)?;
    let file = NamedTempFile::new_in(dir)
        .with_context(|| format!("[run] Failed to create temporary output in {}", dir.display()))?;

    let (sink, summary) = DocumentWriter::new(scene, store)
        .with_verbose(verbose)
        .write(features, BufWriter::new(file))?;

    sink.into_inner()
        .map_err(|e| e.into_error())
        .with_context(|| format!("[run] Failed to flush {}", output.display()))?
        .persist(output)
        .with_context(|| format!("[run] Failed to write {}", output.display()))?;
    Ok(summary)
}

/// Load every snapshot of a run and list its distinct parties with their fill colors.
pub fn list_parties(config: &RunConfig, verbose: u8) -> Result<Vec<(String, Rgba)>> {
    let store = load_snapshots(&config.snapshots, verbose)?;
    Ok(store.list_parties().into_iter()
        .map(|party| (party.to_string(), party_color(party, config.scene.alpha)))
        .collect())
}
