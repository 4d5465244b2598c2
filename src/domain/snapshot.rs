use chrono::{DateTime, Local};

use crate::domain::classify::classify;
use crate::domain::entities::grid::{Grid, RawGrid};
use crate::domain::error::MatrixError;
use crate::domain::index::FeatureIndex;
use crate::domain::layout::MatrixLayout;
use crate::domain::row_filter::RowFilter;

/// One fully built view of the matrix. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub grid: Grid,
    pub index: FeatureIndex,
    pub provider: String,
    pub refreshed_at: DateTime<Local>,
}

impl Snapshot {
    /// Normalizes, classifies and indexes `raw` in one pass.
    pub fn build(
        raw: RawGrid,
        layout: &MatrixLayout,
        provider: &str,
    ) -> Result<Self, MatrixError> {
        let grid = Grid::normalize(raw);
        if grid.is_empty() {
            return Err(MatrixError::EmptyGrid {
                provider: provider.to_string(),
            });
        }

        let grid = classify(grid, layout);
        let filter = RowFilter::from_section_rows(&layout.section_rows);
        if filter.is_empty() {
            tracing::warn!(provider, "no section rows configured, every named row is a feature");
        } else {
            tracing::debug!(provider, section_rows = filter.len(), "section rows ignored");
        }
        let index = FeatureIndex::build(&grid, layout, &filter)?;

        Ok(Self {
            grid,
            index,
            provider: provider.to_string(),
            refreshed_at: Local::now(),
        })
    }
}
