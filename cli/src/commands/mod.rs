pub mod convert;
pub mod parties;

use std::path::Path;

use anyhow::Result;
use election_czml::RunConfig;

use crate::cli::InputArgs;

/// The run named by `--config`, or the built-in federal run over `--data-dir`.
pub fn run_config(input: &InputArgs) -> Result<RunConfig> {
    match &input.config {
        Some(path) => RunConfig::from_json_file(path),
        None => Ok(RunConfig::australian_federal(input.data_dir.as_deref().unwrap_or(Path::new(".")))),
    }
}
