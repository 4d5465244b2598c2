use crate::domain::entities::grid::Grid;
use crate::domain::layout::MatrixLayout;

/// Rewrites category-range cells of a header row to their category label.
///
/// Cells outside every range (static columns, gutters) are copied unchanged.
pub fn classify_header_row(row: &[String], layout: &MatrixLayout) -> Vec<String> {
    row.iter()
        .enumerate()
        .map(|(col, cell)| match layout.category_for_column(col) {
            Some(category) => category.label().to_string(),
            None => cell.clone(),
        })
        .collect()
}

/// Returns `grid` with its header row classified. All other rows pass through.
pub fn classify(grid: Grid, layout: &MatrixLayout) -> Grid {
    let Some(header) = grid.row(layout.header_row) else {
        return grid;
    };
    let classified = classify_header_row(header, layout);
    grid.with_row(layout.header_row, classified)
}

pub fn edition_at<'a>(grid: &'a Grid, layout: &MatrixLayout, col: usize) -> Option<&'a str> {
    grid.cell(layout.header_row, col)
}

pub fn sku_at<'a>(grid: &'a Grid, layout: &MatrixLayout, col: usize) -> Option<&'a str> {
    grid.cell(layout.sku_row, col)
}
