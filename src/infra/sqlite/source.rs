use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domain::entities::grid::RawGrid;
use crate::domain::entities::sheet::SheetRange;
use crate::usecase::ports::grid_source::GridSource;
use crate::usecase::ports::repo::SheetRepository;

/// Serves a range of a sheet previously imported into the local store.
pub struct StoredSheetSource {
    repo: Arc<dyn SheetRepository>,
    range: SheetRange,
}

impl StoredSheetSource {
    pub fn new(repo: Arc<dyn SheetRepository>, range: SheetRange) -> Self {
        Self { repo, range }
    }
}

impl GridSource for StoredSheetSource {
    fn describe(&self) -> String {
        format!("sheet store: {}", self.range)
    }

    fn fetch(&self) -> Result<RawGrid> {
        let rows = self
            .repo
            .load_sheet(&self.range.sheet)
            .with_context(|| format!("failed to load stored sheet: {}", self.range.sheet))?;
        Ok(self.range.window(&rows))
    }
}
