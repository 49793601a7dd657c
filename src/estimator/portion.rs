//! Portion size detection

use serde::{Deserialize, Serialize};

use super::tables::PortionMultiplierTable;

/// The portion label found in a meal description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortionInfo {
    pub size_label: String,
    pub multiplier: f64,
}

/// Find the first portion label, in table order, contained in the normalized text
///
/// Only one portion is reported per meal. When several labels match
/// (e.g. "large" inside "extra large") the earlier table entry wins.
pub fn extract_portion_size(text: &str, portions: &PortionMultiplierTable) -> Option<PortionInfo> {
    portions
        .iter()
        .find(|entry| text.contains(entry.label.as_str()))
        .map(|entry| PortionInfo {
            size_label: entry.label.clone(),
            multiplier: entry.multiplier,
        })
}
