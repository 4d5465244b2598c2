use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use crate::domain::entities::grid::RawGrid;
use crate::infra::sqlite::schema::{init_db, open_connection};
use crate::usecase::ports::repo::SheetMeta;

/// Stores `rows` under `name`, dropping any earlier import of that sheet.
///
/// Only cells present in each row are written so the ragged shape survives a
/// round trip.
pub fn replace_sheet(
    db_path: &Path,
    name: &str,
    source_path: &str,
    rows: &RawGrid,
) -> Result<i64> {
    init_db(db_path)?;
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start sheet import transaction")?;

    tx.execute("DELETE FROM sheet WHERE name = ?1", params![name])
        .with_context(|| format!("failed to drop previous import of sheet: {name}"))?;

    let col_count = rows.iter().map(Vec::len).max().unwrap_or(0);
    tx.execute(
        "INSERT INTO sheet(name, source_path, row_count, col_count) VALUES (?1, ?2, ?3, ?4)",
        params![name, source_path, rows.len() as i64, col_count as i64],
    )
    .with_context(|| format!("failed to insert sheet: {name}"))?;
    let sheet_id = tx.last_insert_rowid();

    let mut insert_cell = tx
        .prepare(
            "INSERT INTO sheet_cell(sheet_id, row_idx, col_idx, value) VALUES (?1, ?2, ?3, ?4)",
        )
        .context("failed to prepare sheet cell insert")?;
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            insert_cell
                .execute(params![sheet_id, row_idx as i64, col_idx as i64, value])
                .context("failed to insert sheet cell")?;
        }
    }
    drop(insert_cell);

    tx.commit()
        .context("failed to commit sheet import transaction")?;
    Ok(sheet_id)
}

/// Reads a stored sheet back as ragged rows; `Ok(None)` when no sheet has that name.
pub fn load_sheet_rows(db_path: &Path, name: &str) -> Result<Option<RawGrid>> {
    init_db(db_path)?;
    let conn = open_connection(db_path)?;

    let sheet = conn
        .query_row(
            "SELECT id, row_count FROM sheet WHERE name = ?1",
            params![name],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
        )
        .optional()
        .with_context(|| format!("failed to look up sheet: {name}"))?;
    let Some((sheet_id, row_count)) = sheet else {
        return Ok(None);
    };

    let mut rows: RawGrid = vec![Vec::new(); row_count.max(0) as usize];
    let mut stmt = conn
        .prepare(
            "SELECT row_idx, col_idx, value
             FROM sheet_cell
             WHERE sheet_id = ?1
             ORDER BY row_idx ASC, col_idx ASC",
        )
        .context("failed to prepare sheet cell query")?;
    let cells = stmt
        .query_map([sheet_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .context("failed to query sheet cells")?;

    for cell in cells {
        let (row_idx, col_idx, value) = cell.context("failed to read sheet cell")?;
        let Some(row) = rows.get_mut(row_idx as usize) else {
            anyhow::bail!("sheet {name} has a cell at row {row_idx} past row count {row_count}")
        };
        row.resize(col_idx as usize, String::new());
        row.push(value);
    }

    Ok(Some(rows))
}

pub fn list_sheets(db_path: &Path) -> Result<Vec<SheetMeta>> {
    init_db(db_path)?;
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(
            "SELECT id, name, source_path, row_count, col_count, imported_at
             FROM sheet
             ORDER BY name ASC",
        )
        .context("failed to prepare sheets query")?;

    let sheets = stmt
        .query_map([], |row| {
            Ok(SheetMeta {
                id: row.get::<_, i64>(0)?.into(),
                name: row.get(1)?,
                source_path: row.get(2)?,
                row_count: row.get(3)?,
                col_count: row.get(4)?,
                imported_at: row.get(5)?,
            })
        })
        .context("failed to query sheets")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect sheets")?;

    Ok(sheets)
}

pub fn delete_sheet(db_path: &Path, name: &str) -> Result<bool> {
    init_db(db_path)?;
    let conn = open_connection(db_path)?;
    let deleted = conn
        .execute("DELETE FROM sheet WHERE name = ?1", params![name])
        .with_context(|| format!("failed to delete sheet: {name}"))?;
    Ok(deleted > 0)
}
