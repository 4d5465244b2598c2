use crate::domain::entities::feature::FeatureResult;
use crate::domain::snapshot::Snapshot;

/// Features whose name contains `term`, ignoring case, in row order.
///
/// Duplicate names are kept as separate entries; the empty term matches every
/// indexed feature.
pub fn search(snapshot: &Snapshot, term: &str) -> Vec<FeatureResult> {
    let term_lower = term.to_lowercase();
    snapshot
        .index
        .records()
        .iter()
        .filter(|record| record.matches(&term_lower))
        .map(|record| record.to_result())
        .collect()
}
