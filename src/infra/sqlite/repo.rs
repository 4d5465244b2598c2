use std::path::PathBuf;

use crate::domain::entities::grid::RawGrid;
use crate::domain::entities::sheet::SheetId;
use crate::infra::sqlite::queries::{delete_sheet, list_sheets, load_sheet_rows, replace_sheet};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::repo::{NewSheetMeta, RepoError, SheetMeta, SheetRepository};

pub struct SqliteRepo {
    pub db_path: PathBuf,
}

impl SheetRepository for SqliteRepo {
    fn init(&self) -> Result<(), RepoError> {
        init_db(&self.db_path).map_err(|err| RepoError::Message(format!("{err:#}")))
    }

    fn list_sheets(&self) -> Result<Vec<SheetMeta>, RepoError> {
        list_sheets(&self.db_path).map_err(|err| RepoError::Message(format!("{err:#}")))
    }

    fn replace_sheet(&self, meta: NewSheetMeta, rows: RawGrid) -> Result<SheetId, RepoError> {
        let sheet_id = replace_sheet(&self.db_path, &meta.name, &meta.source_path, &rows)
            .map_err(|err| RepoError::Message(format!("{err:#}")))?;

        Ok(SheetId(sheet_id))
    }

    fn load_sheet(&self, name: &str) -> Result<RawGrid, RepoError> {
        load_sheet_rows(&self.db_path, name)
            .map_err(|err| RepoError::Message(format!("{err:#}")))?
            .ok_or_else(|| RepoError::SheetNotFound(name.to_string()))
    }

    fn delete_sheet(&self, name: &str) -> Result<(), RepoError> {
        let deleted = delete_sheet(&self.db_path, name)
            .map_err(|err| RepoError::Message(format!("{err:#}")))?;
        if deleted {
            Ok(())
        } else {
            Err(RepoError::SheetNotFound(name.to_string()))
        }
    }
}
