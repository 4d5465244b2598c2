use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditionSku {
    pub edition: String,
    pub sku: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureDetails {
    pub description: String,
    #[serde(rename = "moreInfoLink")]
    pub more_info_link: String,
    pub editions_skus: Vec<EditionSku>,
}

/// One matched feature row.
///
/// Serializes as `{ "<feature name>": { description, moreInfoLink, editions_skus } }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureResult {
    pub row: usize,
    pub name: String,
    pub details: FeatureDetails,
}

impl Serialize for FeatureResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &self.details)?;
        map.end()
    }
}

pub fn results_to_json(results: &[FeatureResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}
