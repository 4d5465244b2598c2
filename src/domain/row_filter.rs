use std::collections::HashSet;

/// Section header rows that are never features.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFilter {
    ignored: HashSet<usize>,
}

impl RowFilter {
    /// Builds the filter from 1-indexed spreadsheet row numbers.
    pub fn from_section_rows(section_rows: &[usize]) -> Self {
        let mut ignored = HashSet::with_capacity(section_rows.len());
        for &row_number in section_rows {
            match row_number.checked_sub(1) {
                Some(row_idx) => {
                    ignored.insert(row_idx);
                }
                None => tracing::warn!("section row 0 has no 1-indexed meaning, skipping"),
            }
        }
        Self { ignored }
    }

    pub fn is_ignorable(&self, row_idx: usize) -> bool {
        self.ignored.contains(&row_idx)
    }

    pub fn len(&self) -> usize {
        self.ignored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ignored.is_empty()
    }
}
