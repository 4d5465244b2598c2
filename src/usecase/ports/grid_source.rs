use anyhow::Result;

use crate::domain::entities::grid::RawGrid;

/// A tabular-data provider: hands back one named range as ragged string rows.
///
/// How the provider authenticates or where it reads from is its own business;
/// failures are reported as opaque errors and never retried by callers.
pub trait GridSource: Send + Sync {
    /// Human-readable label used in logs and snapshot metadata.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<RawGrid>;
}
