use std::path::PathBuf;

/// Election results to CZML converter
#[derive(clap::Parser, Debug)]
#[command(name = "election-czml", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Write the time-dynamic CZML document for a run
    Convert(ConvertArgs),

    /// List the parties found in a run's results, with their fill colors
    Parties(InputArgs),
}

/// Where the run comes from: a run file, or the built-in federal run.
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Directory holding the built-in run's CSV files and shapefile, defaults to "."
    #[arg(short, long, value_hint = clap::ValueHint::DirPath, conflicts_with = "config")]
    pub data_dir: Option<PathBuf>,

    /// JSON run file describing the boundaries, snapshots and output
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output document, defaults to "./elections.czml" or the run file's output
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Smallest multi-polygon part (square degrees) that is rendered
    #[arg(long)]
    pub min_area: Option<f64>,

    /// Extrude fragments by the winning two-party share times this factor
    #[arg(long)]
    pub tpp_extrusion: Option<f64>,

    /// Pretty-print packets
    #[arg(long)]
    pub pretty: bool,
}
