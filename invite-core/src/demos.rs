//! Demo gallery listing.

use serde::{Deserialize, Serialize};

use crate::lenient;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoEntry {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub thumbnail: Option<String>,
}

/// Parse the gallery JSON. Anything unreadable yields an empty gallery;
/// entries that aren't objects are skipped.
pub fn parse_demos(content: &str) -> Vec<DemoEntry> {
    let value: serde_json::Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Demo list is not valid JSON");
            return Vec::new();
        }
    };

    let Some(items) = value.as_array() else {
        tracing::warn!("Demo list is not a JSON array");
        return Vec::new();
    };

    items
        .iter()
        .filter(|item| item.is_object())
        .filter_map(|item| DemoEntry::deserialize(item).ok())
        .collect()
}
