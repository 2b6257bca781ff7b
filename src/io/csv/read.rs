//! CSV reading operations.

use std::{fmt::Display, fs::File, path::Path, str::FromStr};

use anyhow::{Context, Result, anyhow};
use polars::{frame::DataFrame, io::SerReader, prelude::CsvReadOptions};

/// A CSV file read with every column kept as text, projected into typed
/// columns on demand. Any cell that fails to parse is a load error naming
/// the file, column and row.
#[derive(Debug)]
pub(crate) struct CsvTable {
    source: String,
    df: DataFrame,
}

impl CsvTable {
    /// Read a CSV file with a header row from `path`.
    pub(crate) fn read(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(file)
            .finish()
            .with_context(|| format!("[io::csv::read] Failed to read CSV from {}", path.display()))?;
        Ok(Self { source: path.display().to_string(), df })
    }

    /// Read CSV text held in memory; `source` names it in error messages.
    #[cfg(test)]
    pub(crate) fn from_bytes(source: &str, bytes: &[u8]) -> Result<Self> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(std::io::Cursor::new(bytes.to_vec()))
            .finish()
            .with_context(|| format!("[io::csv::read] Failed to read CSV from {source}"))?;
        Ok(Self { source: source.to_string(), df })
    }

    pub(crate) fn source(&self) -> &str { &self.source }

    /// Number of data rows.
    pub(crate) fn height(&self) -> usize { self.df.height() }

    /// Raw cells of a column; a missing column is an error.
    fn cells(&self, column: &str) -> Result<Vec<Option<&str>>> {
        let cells = self.df.column(column)
            .with_context(|| format!("[io::csv::read] {}: missing column {column:?}", self.source))?
            .str()
            .with_context(|| format!("[io::csv::read] {}: column {column:?} is not text", self.source))?;
        Ok(cells.into_iter().collect())
    }

    /// Text column, trimmed; empty cells become empty strings.
    pub(crate) fn text(&self, column: &str) -> Result<Vec<String>> {
        Ok(self.cells(column)?.into_iter()
            .map(|cell| cell.map(str::trim).unwrap_or_default().to_string())
            .collect())
    }

    /// Text column that may be absent from the file altogether.
    pub(crate) fn optional_text(&self, column: &str) -> Result<Option<Vec<String>>> {
        if self.df.get_column_index(column).is_none() { return Ok(None) }
        self.text(column).map(Some)
    }

    /// Column where every cell must parse as `T`.
    pub(crate) fn parsed<T>(&self, column: &str) -> Result<Vec<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.parsed_opt(column)?.into_iter().enumerate()
            .map(|(row, value)| value.ok_or_else(|| anyhow!(
                "[io::csv::read] {}: column {column:?}, row {}: missing value", self.source, row + 1
            )))
            .collect()
    }

    /// Column where empty cells are allowed and every other cell must parse as `T`.
    pub(crate) fn parsed_opt<T>(&self, column: &str) -> Result<Vec<Option<T>>>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.cells(column)?.into_iter().enumerate()
            .map(|(row, cell)| match cell.map(str::trim).filter(|s| !s.is_empty()) {
                None => Ok(None),
                Some(s) => s.parse::<T>().map(Some).map_err(|e| anyhow!(
                    "[io::csv::read] {}: column {column:?}, row {}: cannot parse {s:?}: {e}", self.source, row + 1
                )),
            })
            .collect()
    }
}
