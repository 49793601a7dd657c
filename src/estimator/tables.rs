//! Calorie lookup tables
//!
//! The food and portion tables the estimator matches against. Both are
//! ordered: iteration follows declaration order, which decides tie-breaks
//! when several foods or portion labels match the same text.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::text::normalize_text;

/// Embedded default calorie data
static BUILTIN_CALORIE_DATA: &str = include_str!("data/calorie_data.json");

/// Errors raised while loading or validating calorie tables
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to read calorie data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid calorie data JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty key in {table} table")]
    EmptyKey { table: &'static str },

    #[error("Key '{key}' in {table} table must be lowercase with single spaces")]
    NotNormalized { table: &'static str, key: String },

    #[error("Duplicate key '{key}' in {table} table")]
    DuplicateKey { table: &'static str, key: String },

    #[error("Portion '{label}' has multiplier {multiplier}, must be positive and finite")]
    InvalidMultiplier { label: String, multiplier: f64 },
}

/// A food name with its base calories per item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub name: String,
    pub calories: u32,
}

impl FoodEntry {
    pub fn new(name: impl Into<String>, calories: u32) -> Self {
        Self {
            name: name.into(),
            calories,
        }
    }
}

/// A size label with the multiplier it applies to the meal total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortionEntry {
    pub label: String,
    pub multiplier: f64,
}

impl PortionEntry {
    pub fn new(label: impl Into<String>, multiplier: f64) -> Self {
        Self {
            label: label.into(),
            multiplier,
        }
    }
}

/// Ordered food name -> base calories table
#[derive(Debug, Clone, Default)]
pub struct FoodCalorieTable {
    entries: Vec<FoodEntry>,
}

impl FoodCalorieTable {
    pub fn iter(&self) -> std::slice::Iter<'_, FoodEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the base calories for an exact food name
    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.calories)
    }
}

/// Ordered size label -> multiplier table
#[derive(Debug, Clone, Default)]
pub struct PortionMultiplierTable {
    entries: Vec<PortionEntry>,
}

impl PortionMultiplierTable {
    pub fn iter(&self) -> std::slice::Iter<'_, PortionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.multiplier)
    }
}

/// On-disk format: arrays keep declaration order
#[derive(Debug, Deserialize)]
struct CalorieDataFile {
    foods: Vec<FoodEntry>,
    #[serde(default)]
    portions: Vec<PortionEntry>,
}

/// The validated pair of lookup tables
#[derive(Debug, Clone, Default)]
pub struct CalorieTables {
    foods: FoodCalorieTable,
    portions: PortionMultiplierTable,
}

impl CalorieTables {
    /// Build tables from ordered entries, validating keys and multipliers
    pub fn new(foods: Vec<FoodEntry>, portions: Vec<PortionEntry>) -> Result<Self, TableError> {
        validate_keys("food", foods.iter().map(|e| e.name.as_str()))?;
        validate_keys("portion", portions.iter().map(|e| e.label.as_str()))?;

        for portion in &portions {
            if !(portion.multiplier.is_finite() && portion.multiplier > 0.0) {
                return Err(TableError::InvalidMultiplier {
                    label: portion.label.clone(),
                    multiplier: portion.multiplier,
                });
            }
        }

        Ok(Self {
            foods: FoodCalorieTable { entries: foods },
            portions: PortionMultiplierTable { entries: portions },
        })
    }

    /// Parse and validate tables from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        let data: CalorieDataFile = serde_json::from_str(json)?;
        Self::new(data.foods, data.portions)
    }

    /// Load tables from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The default tables compiled into the binary
    pub fn builtin() -> Result<Self, TableError> {
        Self::from_json_str(BUILTIN_CALORIE_DATA)
    }

    pub fn foods(&self) -> &FoodCalorieTable {
        &self.foods
    }

    pub fn portions(&self) -> &PortionMultiplierTable {
        &self.portions
    }
}

fn validate_keys<'a>(
    table: &'static str,
    keys: impl Iterator<Item = &'a str>,
) -> Result<(), TableError> {
    let mut seen = HashSet::new();
    for key in keys {
        if key.is_empty() {
            return Err(TableError::EmptyKey { table });
        }
        // Keys are compared against normalized text, so they must already be normalized
        if normalize_text(key) != key {
            return Err(TableError::NotNormalized {
                table,
                key: key.to_string(),
            });
        }
        if !seen.insert(key) {
            return Err(TableError::DuplicateKey {
                table,
                key: key.to_string(),
            });
        }
    }
    Ok(())
}
