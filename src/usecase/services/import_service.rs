use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::domain::entities::grid::RawGrid;
use crate::domain::entities::sheet::SheetId;
use crate::infra::import::csv::read_csv_rows;
use crate::infra::import::xlsx::{list_sheet_names, read_sheet_rows};
use crate::usecase::ports::repo::{NewSheetMeta, SheetMeta, SheetRepository};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResult {
    pub sheet_id: SheetId,
    pub sheet_name: String,
    pub row_count: usize,
}

pub struct ImportService {
    repo: Arc<dyn SheetRepository>,
}

impl ImportService {
    pub fn new(repo: Arc<dyn SheetRepository>) -> Self {
        Self { repo }
    }

    /// Imports a `.csv` or `.xlsx` file into the sheet store as `sheet_name`.
    ///
    /// For workbooks the worksheet called `sheet_name` is read; when none
    /// exists the first worksheet is used.
    pub fn import_file(&self, path: &Path, sheet_name: &str) -> Result<ImportResult> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_default();

        let rows = match ext.as_str() {
            "xlsx" | "xlsm" | "xls" | "ods" => read_workbook_sheet(path, sheet_name)?,
            _ => read_csv_rows(path)?,
        };

        self.store(path, sheet_name, rows)
    }

    pub fn list_sheets(&self) -> Result<Vec<SheetMeta>> {
        self.repo
            .list_sheets()
            .map_err(|err| anyhow!(err.to_string()))
    }

    pub fn delete_sheet(&self, sheet_name: &str) -> Result<()> {
        self.repo
            .delete_sheet(sheet_name)
            .map_err(|err| anyhow!(err.to_string()))?;
        tracing::info!(sheet = sheet_name, "sheet deleted");
        Ok(())
    }

    fn store(&self, path: &Path, sheet_name: &str, rows: RawGrid) -> Result<ImportResult> {
        let row_count = rows.len();
        let sheet_id = self
            .repo
            .replace_sheet(
                NewSheetMeta {
                    name: sheet_name.to_string(),
                    source_path: path.to_string_lossy().into_owned(),
                },
                rows,
            )
            .map_err(|err| anyhow!(err.to_string()))?;

        tracing::info!(
            sheet = sheet_name,
            rows = row_count,
            source = %path.display(),
            "sheet imported"
        );

        Ok(ImportResult {
            sheet_id,
            sheet_name: sheet_name.to_string(),
            row_count,
        })
    }
}

fn read_workbook_sheet(path: &Path, sheet_name: &str) -> Result<RawGrid> {
    let names = list_sheet_names(path)?;
    let target = if names.iter().any(|name| name == sheet_name) {
        sheet_name.to_string()
    } else {
        let first = names
            .first()
            .ok_or_else(|| anyhow!("workbook has no sheets: {}", path.display()))?;
        tracing::warn!(
            wanted = sheet_name,
            using = %first,
            "worksheet not found, importing first sheet"
        );
        first.clone()
    };
    read_sheet_rows(path, &target)
}
