use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::entities::grid::RawGrid;
use crate::domain::entities::sheet::trim_ragged;
use crate::usecase::ports::grid_source::GridSource;

/// Reads every record of a header-less CSV file as one raw row.
pub fn read_csv_rows(csv_path: &Path) -> Result<RawGrid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record
            .with_context(|| format!("failed to parse csv record in: {}", csv_path.display()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}

pub struct CsvGridSource {
    pub csv_path: PathBuf,
}

impl GridSource for CsvGridSource {
    fn describe(&self) -> String {
        format!("csv: {}", self.csv_path.display())
    }

    fn fetch(&self) -> Result<RawGrid> {
        read_csv_rows(&self.csv_path).map(trim_ragged)
    }
}
