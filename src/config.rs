//! Run and scene configuration.

use std::{fmt, path::{Path, PathBuf}};

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::color::DEFAULT_ALPHA;

/// Whether a snapshot is a general election or a by-election.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapshotKind {
    General,
    ByElection,
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SnapshotKind::General => "general",
            SnapshotKind::ByElection => "by-election",
        })
    }
}

/// One dated results snapshot and the files it is loaded from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotSpec {
    pub date: NaiveDate,
    pub kind: SnapshotKind,
    /// Members-elected file (general) or candidates file (by-election).
    pub results: PathBuf,
    /// TPP by division (general) or by polling place (by-election), if published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tpp: Option<PathBuf>,
}

impl SnapshotSpec {
    pub fn general(date: NaiveDate, results: impl Into<PathBuf>, tpp: Option<PathBuf>) -> Self {
        Self { date, kind: SnapshotKind::General, results: results.into(), tpp }
    }

    pub fn by_election(date: NaiveDate, results: impl Into<PathBuf>, tpp: Option<PathBuf>) -> Self {
        Self { date, kind: SnapshotKind::ByElection, results: results.into(), tpp }
    }
}

/// Rendering options for the document, independent of the dataset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneOptions {
    /// Animation seconds per wall-clock second (30 days by default).
    pub multiplier: f64,
    pub alpha: u8,
    /// Minimum planar area (squared source units) for a fragment to be rendered.
    /// Tuned against the 2015 federal boundaries; recalibrate for other datasets.
    pub min_fragment_area: f64,
    /// `name` of every fragment packet.
    pub fragment_label: String,
    /// When set, fragments are extruded by the winning TPP share times this factor.
    pub tpp_extrusion: Option<f64>,
    pub pretty: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            multiplier: 2_592_000.0,
            alpha: DEFAULT_ALPHA,
            min_fragment_area: 0.0028,
            fragment_label: "Federal Electorate".to_string(),
            tpp_extrusion: None,
            pretty: false,
        }
    }
}

/// Immutable settings for one document.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Animation epoch; offsets are measured from midnight UTC on this date.
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub options: SceneOptions,
}

impl SceneConfig {
    pub fn new(start: NaiveDate, end: NaiveDate, options: SceneOptions) -> Self {
        Self { start, end, options }
    }

    /// Scene spanning the earliest to the latest snapshot date.
    pub fn spanning(snapshots: &[SnapshotSpec], options: SceneOptions) -> Result<Self> {
        let start = snapshots.iter().map(|s| s.date).min()
            .ok_or_else(|| anyhow!("[config] at least one snapshot is required"))?;
        let end = snapshots.iter().map(|s| s.date).max().unwrap_or(start);
        Ok(Self::new(start, end, options))
    }

    /// Seconds from the animation epoch to midnight UTC on `date`.
    pub fn offset_seconds(&self, date: NaiveDate) -> i64 {
        date.signed_duration_since(self.start).num_seconds()
    }

    /// ISO 8601 instant for midnight UTC on `date`.
    pub fn instant(date: NaiveDate) -> String {
        date.format("%Y-%m-%dT00:00:00Z").to_string()
    }

    pub fn start_instant(&self) -> String { Self::instant(self.start) }

    pub fn end_instant(&self) -> String { Self::instant(self.end) }
}

fn default_name_field() -> String { "ELECT_DIV".to_string() }

/// Everything one conversion run needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Division boundary shapefile.
    pub boundaries: PathBuf,
    /// Attribute holding the division name.
    #[serde(default = "default_name_field")]
    pub name_field: String,
    /// Snapshots in chronological order.
    pub snapshots: Vec<SnapshotSpec>,
    pub output: PathBuf,
    #[serde(default)]
    pub scene: SceneOptions,
}

/// `(year, month, day, kind, results file, tpp file)` for every federal
/// snapshot between the 2004 and 2014 elections.
const AUSTRALIAN_FEDERAL: &[(i32, u32, u32, SnapshotKind, &str, Option<&str>)] = &[
    (2004, 10, 9, SnapshotKind::General, "2004-HouseMembersElectedDownload-12246.csv", Some("2004-HouseTppByDivisionDownload-12246.csv")),
    (2007, 11, 24, SnapshotKind::General, "2007-HouseMembersElectedDownload-13745.csv", Some("2007-HouseTppByDivisionDownload-13745.csv")),
    (2008, 6, 28, SnapshotKind::ByElection, "2008-Gippsland-HouseCandidatesDownload-13813.csv", Some("2008-Gippsland-HouseTppByPollingPlaceDownload-13813.csv")),
    (2008, 9, 6, SnapshotKind::ByElection, "2008-Lyne-HouseCandidatesDownload-13827.csv", None),
    (2008, 9, 6, SnapshotKind::ByElection, "2008-Mayo-HouseCandidatesDownload-13826.csv", None),
    (2009, 12, 5, SnapshotKind::ByElection, "2009-Bradfield-HouseCandidatesDownload-14357.csv", None),
    (2009, 12, 5, SnapshotKind::ByElection, "2009-Higgins-HouseCandidatesDownload-14358.csv", None),
    (2010, 8, 21, SnapshotKind::General, "2010-HouseMembersElectedDownload-15508.csv", Some("2010-HouseTppByDivisionDownload-15508.csv")),
    (2013, 9, 7, SnapshotKind::General, "2013-HouseMembersElectedDownload-17496.csv", Some("2013-HouseTppByDivisionDownload-17496.csv")),
    (2014, 2, 8, SnapshotKind::ByElection, "2014-Griffith-HouseCandidatesDownload-17552.csv", Some("2014-Griffith-HouseTppByPollingPlaceDownload-17552.csv")),
];

impl RunConfig {
    /// The built-in run: Australian federal results 2004-2014 against the
    /// 2015 electorate boundaries, all files found in `data_dir`.
    pub fn australian_federal(data_dir: &Path) -> Self {
        let snapshots = AUSTRALIAN_FEDERAL.iter()
            .filter_map(|&(y, m, d, kind, results, tpp)| Some(SnapshotSpec {
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                kind,
                results: data_dir.join(results),
                tpp: tpp.map(|f| data_dir.join(f)),
            }))
            .collect();

        Self {
            boundaries: data_dir.join("Electorates.shp"),
            name_field: default_name_field(),
            snapshots,
            output: PathBuf::from("elections.czml"),
            scene: SceneOptions::default(),
        }
    }

    /// Read a run file. Relative paths inside it are resolved against the file's directory.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read run file {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("[config] Failed to parse run file {}", path.display()))?;
        Ok(config.resolve_paths(path.parent().unwrap_or(Path::new(""))))
    }

    /// Prefix every relative path with `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let resolve = |p: &mut PathBuf| if p.is_relative() { *p = base.join(&*p) };
        resolve(&mut self.boundaries);
        resolve(&mut self.output);
        for snapshot in &mut self.snapshots {
            resolve(&mut snapshot.results);
            if let Some(tpp) = snapshot.tpp.as_mut() { resolve(tpp) }
        }
        self
    }

    /// Scene spanning this run's snapshots.
    pub fn scene(&self) -> Result<SceneConfig> {
        SceneConfig::spanning(&self.snapshots, self.scene.clone())
    }
}
