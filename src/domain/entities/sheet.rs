use std::fmt;

use anyhow::{bail, Context, Result};

use crate::domain::entities::grid::RawGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetId(pub i64);

impl From<i64> for SheetId {
    fn from(value: i64) -> Self {
        SheetId(value)
    }
}

/// A named range of a named sheet, as in `Features (Current)!A1:AK`.
///
/// Rows and columns are 0-indexed and inclusive; `None` bounds run to the
/// last populated row or column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRange {
    pub sheet: String,
    pub first_row: usize,
    pub first_col: usize,
    pub last_row: Option<usize>,
    pub last_col: Option<usize>,
}

impl SheetRange {
    pub fn whole_sheet(sheet: &str) -> Self {
        Self {
            sheet: sheet.to_string(),
            first_row: 0,
            first_col: 0,
            last_row: None,
            last_col: None,
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let Some((sheet_part, cells)) = text.rsplit_once('!') else {
            if text.is_empty() {
                bail!("range must name a sheet")
            }
            return Ok(Self::whole_sheet(&unquote_sheet_name(text)));
        };

        let sheet = unquote_sheet_name(sheet_part.trim());
        if sheet.is_empty() {
            bail!("range must name a sheet: {text}")
        }

        let (start, end) = match cells.split_once(':') {
            Some((start, end)) => (start, Some(end)),
            None => (cells, None),
        };
        let (start_col, start_row) =
            parse_cell_ref(start).with_context(|| format!("invalid range start in: {text}"))?;
        let (last_col, last_row) = match end {
            Some(end) => {
                parse_cell_ref(end).with_context(|| format!("invalid range end in: {text}"))?
            }
            // A single cell reference selects just that cell.
            None => (start_col, start_row),
        };

        let range = Self {
            sheet,
            first_row: start_row.unwrap_or(0),
            first_col: start_col.unwrap_or(0),
            last_row,
            last_col,
        };

        if range.last_row.is_some_and(|last| last < range.first_row)
            || range.last_col.is_some_and(|last| last < range.first_col)
        {
            bail!("range end is before range start: {text}")
        }

        Ok(range)
    }

    /// Cuts the range out of a sheet's rows, shaped like a remote provider's answer:
    /// trailing empty cells of each row and trailing empty rows are dropped.
    pub fn window(&self, rows: &[Vec<String>]) -> RawGrid {
        let row_end = match self.last_row {
            Some(last) => rows.len().min(last + 1),
            None => rows.len(),
        };

        let cut: RawGrid = rows
            .get(self.first_row..row_end)
            .unwrap_or_default()
            .iter()
            .map(|row| {
                let col_end = match self.last_col {
                    Some(last) => row.len().min(last + 1),
                    None => row.len(),
                };
                row.get(self.first_col..col_end).unwrap_or_default().to_vec()
            })
            .collect();

        trim_ragged(cut)
    }
}

/// Drops trailing empty cells from every row, then trailing empty rows.
pub fn trim_ragged(mut rows: RawGrid) -> RawGrid {
    for row in &mut rows {
        while row.last().is_some_and(|cell| cell.is_empty()) {
            row.pop();
        }
    }
    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }
    rows
}

impl fmt::Display for SheetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::whole_sheet(&self.sheet) {
            return write!(f, "{}", self.sheet);
        }
        write!(
            f,
            "{}!{}{}",
            self.sheet,
            column_letters(self.first_col),
            self.first_row + 1
        )?;
        match (self.last_col, self.last_row) {
            (Some(col), Some(row)) => write!(f, ":{}{}", column_letters(col), row + 1),
            (Some(col), None) => write!(f, ":{}", column_letters(col)),
            (None, Some(row)) => write!(f, ":{}", row + 1),
            (None, None) => Ok(()),
        }
    }
}

fn unquote_sheet_name(name: &str) -> String {
    match name.strip_prefix('\'').and_then(|rest| rest.strip_suffix('\'')) {
        Some(inner) => inner.replace("''", "'"),
        None => name.to_string(),
    }
}

/// `AK12` -> `(Some(36), Some(11))`; either half may be absent.
fn parse_cell_ref(text: &str) -> Result<(Option<usize>, Option<usize>)> {
    let text = text.trim();
    let split = text
        .find(|ch: char| !ch.is_ascii_alphabetic())
        .unwrap_or(text.len());
    let (letters, digits) = text.split_at(split);

    if letters.is_empty() && digits.is_empty() {
        bail!("empty cell reference")
    }

    let col = if letters.is_empty() {
        None
    } else {
        Some(column_index(letters)?)
    };
    let row = if digits.is_empty() {
        None
    } else {
        let number: usize = digits
            .parse()
            .with_context(|| format!("invalid row number: {digits}"))?;
        if number == 0 {
            bail!("row numbers start at 1: {text}")
        }
        Some(number - 1)
    };

    Ok((col, row))
}

pub fn column_index(letters: &str) -> Result<usize> {
    let mut index = 0_usize;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            bail!("invalid column letters: {letters}")
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index
            .checked_mul(26)
            .and_then(|value| value.checked_add(digit))
            .with_context(|| format!("column out of range: {letters}"))?;
    }
    if index == 0 {
        bail!("missing column letters")
    }
    Ok(index - 1)
}

pub fn column_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut value = index + 1;
    while value > 0 {
        let rem = (value - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        value = (value - 1) / 26;
    }
    letters.iter().rev().collect()
}
