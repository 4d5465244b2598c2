use crate::domain::entities::grid::RawGrid;
use crate::domain::entities::sheet::SheetId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Message(String),
    SheetNotFound(String),
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoError::Message(message) => write!(f, "{message}"),
            RepoError::SheetNotFound(name) => write!(f, "sheet not found: {name}"),
        }
    }
}

impl std::error::Error for RepoError {}

/// Local store of imported raw sheets, keyed by sheet name.
pub trait SheetRepository: Send + Sync {
    fn init(&self) -> Result<(), RepoError>;

    fn list_sheets(&self) -> Result<Vec<SheetMeta>, RepoError>;
    /// Replaces any sheet with the same name in one transaction.
    fn replace_sheet(&self, meta: NewSheetMeta, rows: RawGrid) -> Result<SheetId, RepoError>;
    fn load_sheet(&self, name: &str) -> Result<RawGrid, RepoError>;
    fn delete_sheet(&self, name: &str) -> Result<(), RepoError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetMeta {
    pub id: SheetId,
    pub name: String,
    pub source_path: String,
    pub row_count: i64,
    pub col_count: i64,
    pub imported_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSheetMeta {
    pub name: String,
    pub source_path: String,
}
