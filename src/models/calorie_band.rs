//! Calorie band
//!
//! Coarse low/medium/high bucket of a calorie figure, used when listing meals.

use serde::{Deserialize, Serialize};

/// Upper bound (inclusive) of the low band
pub const LOW_BAND_MAX: i64 = 200;
/// Upper bound (inclusive) of the medium band
pub const MEDIUM_BAND_MAX: i64 = 500;

/// Calorie band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalorieBand {
    Low,
    Medium,
    High,
}

impl CalorieBand {
    pub fn classify(calories: i64) -> Self {
        if calories <= LOW_BAND_MAX {
            CalorieBand::Low
        } else if calories <= MEDIUM_BAND_MAX {
            CalorieBand::Medium
        } else {
            CalorieBand::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CalorieBand::Low => "low",
            CalorieBand::Medium => "medium",
            CalorieBand::High => "high",
        }
    }
}
