use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};

use crate::domain::entities::grid::RawGrid;
use crate::domain::entities::sheet::SheetRange;
use crate::usecase::ports::grid_source::GridSource;

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

pub fn list_sheet_names(xlsx_path: &Path) -> Result<Vec<String>> {
    let workbook = open_workbook_auto(xlsx_path)
        .with_context(|| format!("failed to open xlsx: {}", xlsx_path.display()))?;
    Ok(workbook.sheet_names())
}

/// Reads a whole worksheet with cell positions anchored at A1.
///
/// calamine ranges start at the first used cell, so leading blank rows and
/// columns are padded back in.
pub fn read_sheet_rows(xlsx_path: &Path, sheet_name: &str) -> Result<RawGrid> {
    let mut workbook = open_workbook_auto(xlsx_path)
        .with_context(|| format!("failed to open xlsx: {}", xlsx_path.display()))?;
    let range = workbook
        .worksheet_range(sheet_name)
        .with_context(|| format!("failed to read sheet: {sheet_name}"))?;

    let (start_row, start_col) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));

    let mut rows: RawGrid = vec![Vec::new(); start_row];
    for row in range.rows() {
        let mut cells = vec![String::new(); start_col];
        cells.extend(row.iter().map(cell_to_string));
        rows.push(cells);
    }

    Ok(rows)
}

pub struct XlsxGridSource {
    pub xlsx_path: PathBuf,
    pub range: SheetRange,
}

impl GridSource for XlsxGridSource {
    fn describe(&self) -> String {
        format!("xlsx: {} ({})", self.xlsx_path.display(), self.range)
    }

    fn fetch(&self) -> Result<RawGrid> {
        let rows = read_sheet_rows(&self.xlsx_path, &self.range.sheet)?;
        Ok(self.range.window(&rows))
    }
}
