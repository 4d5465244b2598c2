use crate::domain::classify::{edition_at, sku_at};
use crate::domain::entities::feature::{EditionSku, FeatureDetails, FeatureResult};
use crate::domain::entities::grid::Grid;
use crate::domain::error::MatrixError;
use crate::domain::layout::MatrixLayout;
use crate::domain::row_filter::RowFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    pub row: usize,
    pub name: String,
    pub description: String,
    pub more_info_link: String,
    pub supported: Vec<EditionSku>,
    name_lower: String,
}

impl FeatureRecord {
    pub fn matches(&self, term_lower: &str) -> bool {
        self.name_lower.contains(term_lower)
    }

    pub fn to_result(&self) -> FeatureResult {
        FeatureResult {
            row: self.row,
            name: self.name.clone(),
            details: FeatureDetails {
                description: self.description.clone(),
                more_info_link: self.more_info_link.clone(),
                editions_skus: self.supported.clone(),
            },
        }
    }
}

/// Feature rows of one classified grid, in ascending row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureIndex {
    records: Vec<FeatureRecord>,
}

impl FeatureIndex {
    /// Indexes every non-section row with a non-empty feature name.
    ///
    /// `grid` must already be classified so header cells carry category labels.
    pub fn build(
        grid: &Grid,
        layout: &MatrixLayout,
        filter: &RowFilter,
    ) -> Result<Self, MatrixError> {
        let mut records = Vec::new();

        for (row_idx, row) in grid.rows().iter().enumerate() {
            if filter.is_ignorable(row_idx) {
                continue;
            }
            let name = row.get(layout.name_col).map_or("", String::as_str);
            if name.is_empty() {
                continue;
            }
            if row.len() < layout.required_static_columns() {
                return Err(MatrixError::MalformedRow {
                    row: row_idx,
                    column: row.len(),
                    columns: row.len(),
                });
            }
            let description = &row[layout.description_col];
            let more_info_link = &row[layout.link_col];

            let mut supported = Vec::new();
            for col in layout.data_columns.clone() {
                let Some(cell) = row.get(col) else {
                    break;
                };
                if cell != &layout.marker {
                    continue;
                }
                let edition = edition_at(grid, layout, col);
                let sku = sku_at(grid, layout, col);
                supported.push(EditionSku {
                    edition: metadata_cell(edition, grid, layout.header_row, col)?,
                    sku: metadata_cell(sku, grid, layout.sku_row, col)?,
                });
            }

            records.push(FeatureRecord {
                row: row_idx,
                name_lower: name.to_lowercase(),
                name: name.to_string(),
                description: description.clone(),
                more_info_link: more_info_link.clone(),
                supported,
            });
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn metadata_cell(
    cell: Option<&str>,
    grid: &Grid,
    row_idx: usize,
    col: usize,
) -> Result<String, MatrixError> {
    cell.map(str::to_string).ok_or(MatrixError::MalformedRow {
        row: row_idx,
        column: col,
        columns: grid.row(row_idx).map_or(0, <[String]>::len),
    })
}
