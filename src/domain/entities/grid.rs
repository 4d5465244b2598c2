/// Ragged rows exactly as a provider returns them.
pub type RawGrid = Vec<Vec<String>>;

/// Rectangular, immutable feature matrix.
///
/// Every row has `width` cells. Build one with [`Grid::normalize`]; replacing
/// data means building a new grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
    width: usize,
}

impl Grid {
    /// Pads every row with empty cells up to the longest row's length.
    pub fn normalize(raw: RawGrid) -> Self {
        let width = raw.iter().map(Vec::len).max().unwrap_or(0);
        let rows = raw
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Self { rows, width }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, row_idx: usize) -> Option<&[String]> {
        self.rows.get(row_idx).map(Vec::as_slice)
    }

    pub fn cell(&self, row_idx: usize, col_idx: usize) -> Option<&str> {
        self.rows
            .get(row_idx)
            .and_then(|row| row.get(col_idx))
            .map(String::as_str)
    }

    /// Returns a new grid with `row_idx` replaced by `row` (padded or cut to `width`).
    ///
    /// Out-of-range indices leave the grid unchanged.
    pub fn with_row(mut self, row_idx: usize, mut row: Vec<String>) -> Self {
        if let Some(slot) = self.rows.get_mut(row_idx) {
            row.resize(self.width, String::new());
            *slot = row;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rows: &[&[&str]]) -> RawGrid {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn normalize_pads_ragged_rows_to_widest_row() {
        let grid = Grid::normalize(raw(&[&["a"], &["b", "c", "d"], &[]]));

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert!(grid.rows().iter().all(|row| row.len() == 3));
        assert_eq!(grid.row(0), Some(&["a".to_string(), String::new(), String::new()][..]));
        assert_eq!(grid.cell(1, 2), Some("d"));
        assert_eq!(grid.cell(2, 0), Some(""));
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = Grid::normalize(raw(&[&["a", "b"], &["c"], &["d", "e", "f", "g"]]));
        let twice = Grid::normalize(once.rows().to_vec());

        assert_eq!(once, twice);
    }

    #[test]
    fn normalize_empty_input_yields_empty_grid() {
        let grid = Grid::normalize(Vec::new());

        assert!(grid.is_empty());
        assert_eq!(grid.width(), 0);
        assert_eq!(grid.row(0), None);
    }

    #[test]
    fn with_row_keeps_width_and_ignores_missing_rows() {
        let grid = Grid::normalize(raw(&[&["a", "b", "c"], &["d"]]));

        let replaced = grid.clone().with_row(1, vec!["x".to_string()]);
        assert_eq!(replaced.cell(1, 0), Some("x"));
        assert_eq!(replaced.row(1).map(<[String]>::len), Some(3));

        let untouched = grid.clone().with_row(9, vec!["x".to_string()]);
        assert_eq!(untouched, grid);
    }
}
