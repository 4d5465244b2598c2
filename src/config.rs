use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use directories::ProjectDirs;

use crate::domain::entities::sheet::SheetRange;
use crate::domain::layout::MatrixLayout;

pub const DEFAULT_SHEET_RANGE: &str = "Okta Features and SKU (Current)!A1:AK";

pub const ENV_DB_PATH: &str = "FEATURE_MATRIX_DB";
pub const ENV_SHEET_RANGE: &str = "FEATURE_MATRIX_RANGE";
pub const ENV_REFRESH_ON_SEARCH: &str = "FEATURE_MATRIX_REFRESH_ON_SEARCH";
pub const ENV_SOURCE: &str = "FEATURE_MATRIX_SOURCE";

/// Where refreshes read the matrix from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixSource {
    /// The sheet imported into the local store under the range's sheet name.
    Store,
    Csv(PathBuf),
    Xlsx(PathBuf),
}

impl MatrixSource {
    /// `store` (or blank) selects the sheet store; anything else is a file path
    /// whose extension picks the reader.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() || text.eq_ignore_ascii_case("store") {
            return Ok(Self::Store);
        }

        let path = PathBuf::from(text);
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(Self::Csv(path)),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(Self::Xlsx(path)),
            _ => bail!("expected `store` or a .csv/.xlsx path, got `{text}`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub sheet_range: SheetRange,
    pub refresh_before_search: bool,
    pub source: MatrixSource,
    pub layout: MatrixLayout,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Built-in defaults, overridden by whatever `lookup` returns per variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = match lookup(ENV_DB_PATH).filter(|value| !value.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };

        let range_text =
            lookup(ENV_SHEET_RANGE).unwrap_or_else(|| DEFAULT_SHEET_RANGE.to_string());
        let sheet_range = SheetRange::parse(&range_text)
            .with_context(|| format!("invalid {ENV_SHEET_RANGE}: {range_text}"))?;

        let refresh_before_search = match lookup(ENV_REFRESH_ON_SEARCH) {
            Some(value) => parse_bool(&value)
                .with_context(|| format!("invalid {ENV_REFRESH_ON_SEARCH}: {value}"))?,
            None => true,
        };

        let source = match lookup(ENV_SOURCE) {
            Some(value) => MatrixSource::parse(&value)
                .with_context(|| format!("invalid {ENV_SOURCE}: {value}"))?,
            None => MatrixSource::Store,
        };

        Ok(Self {
            db_path,
            sheet_range,
            refresh_before_search,
            source,
            layout: MatrixLayout::default(),
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected true/false, got `{other}`"),
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "featurematrix", "feature-matrix")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn default_db_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join("sheets.sqlite"))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}
