//! Calorie estimation
//!
//! Estimates the calories in a free-text meal description by matching food
//! keywords against a lookup table.
//!
//! The pipeline is: normalize text -> detect portion -> match keywords and
//! their quantities -> aggregate -> classify confidence. Estimation never
//! fails; empty or unrecognized meals are reported through [`Confidence`].

pub mod matcher;
pub mod portion;
pub mod quantity;
pub mod tables;
pub mod text;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use matcher::{find_keyword_matches, KeywordMatches};
pub use portion::{extract_portion_size, PortionInfo};
pub use quantity::extract_quantity;
pub use tables::{
    CalorieTables, FoodCalorieTable, FoodEntry, PortionEntry, PortionMultiplierTable, TableError,
};
pub use text::normalize_text;

/// Calories assumed for a meal with no recognized food
pub const DEFAULT_MEAL_CALORIES: u32 = 250;

/// Breakdown label used for the default estimate
pub const UNKNOWN_MEAL: &str = "unknown meal";

/// How much the estimate can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Empty input
    None,
    /// No food recognized, default estimate used
    Low,
    /// Exactly one food recognized
    Medium,
    /// Two or more foods recognized
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::None => "none",
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "low" => Confidence::Low,
            "medium" => Confidence::Medium,
            "high" => Confidence::High,
            _ => Confidence::None,
        }
    }

    /// Confidence for a number of recognized foods
    fn from_match_count(count: usize) -> Self {
        match count {
            0 => Confidence::Low,
            1 => Confidence::Medium,
            _ => Confidence::High,
        }
    }
}

/// One recognized food and its calorie contribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub food: String,
    pub base_calories: u32,
    pub quantity: u32,
    pub calories: u64,
}

impl KeywordMatch {
    pub fn new(food: &str, base_calories: u32, quantity: u32) -> Self {
        Self {
            food: food.to_string(),
            base_calories,
            quantity,
            calories: u64::from(base_calories) * u64::from(quantity),
        }
    }

    /// Synthetic entry reported when nothing was recognized
    pub fn unknown_meal() -> Self {
        Self::new(UNKNOWN_MEAL, DEFAULT_MEAL_CALORIES, 1)
    }
}

/// Result of estimating one meal description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub calories: u64,
    pub confidence: Confidence,
    pub breakdown: Vec<KeywordMatch>,
    pub portion_size: Option<String>,
}

impl EstimationResult {
    /// Result for empty or whitespace-only input
    pub fn empty() -> Self {
        Self {
            calories: 0,
            confidence: Confidence::None,
            breakdown: Vec::new(),
            portion_size: None,
        }
    }
}

/// Calorie estimator over a fixed pair of lookup tables
///
/// Cloning is cheap; clones share the same read-only tables.
#[derive(Debug, Clone)]
pub struct Estimator {
    tables: Arc<CalorieTables>,
}

impl Estimator {
    pub fn new(tables: CalorieTables) -> Self {
        Self {
            tables: Arc::new(tables),
        }
    }

    /// Estimator over the embedded default tables
    pub fn builtin() -> Result<Self, TableError> {
        Ok(Self::new(CalorieTables::builtin()?))
    }

    pub fn tables(&self) -> &CalorieTables {
        &self.tables
    }

    /// Estimate the calories of a meal description
    pub fn estimate(&self, meal_text: &str) -> EstimationResult {
        estimate_calories(&self.tables, meal_text)
    }
}

/// Estimate the calories of a meal description against `tables`
pub fn estimate_calories(tables: &CalorieTables, meal_text: &str) -> EstimationResult {
    let normalized = normalize_text(meal_text);
    if normalized.is_empty() {
        return EstimationResult::empty();
    }

    let portion = extract_portion_size(&normalized, tables.portions());
    let KeywordMatches {
        matches,
        total_calories,
    } = find_keyword_matches(&normalized, tables.foods());

    let confidence = Confidence::from_match_count(matches.len());
    let portion_size = portion.as_ref().map(|p| p.size_label.clone());

    let result = if matches.is_empty() {
        EstimationResult {
            calories: u64::from(DEFAULT_MEAL_CALORIES),
            confidence,
            breakdown: vec![KeywordMatch::unknown_meal()],
            portion_size,
        }
    } else {
        let calories = match &portion {
            Some(p) => scale_calories(total_calories, p.multiplier),
            None => total_calories,
        };
        EstimationResult {
            calories,
            confidence,
            breakdown: matches,
            portion_size,
        }
    };

    tracing::debug!(
        "Estimated '{}': {} cal ({} confidence, {} item(s), portion {:?})",
        normalized,
        result.calories,
        result.confidence.as_str(),
        result.breakdown.len(),
        result.portion_size
    );

    result
}

/// Apply a portion multiplier, rounding half away from zero
fn scale_calories(total: u64, multiplier: f64) -> u64 {
    (total as f64 * multiplier).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimator() -> Estimator {
        Estimator::builtin().unwrap()
    }

    fn foods(result: &EstimationResult) -> Vec<&str> {
        result.breakdown.iter().map(|m| m.food.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        let est = estimator();
        for text in ["", "   ", "\t\n "] {
            let result = est.estimate(text);
            assert_eq!(result, EstimationResult::empty());
        }
    }

    #[test]
    fn test_single_food() {
        let result = estimator().estimate("banana");
        assert_eq!(result.calories, 105);
        assert_eq!(result.confidence, Confidence::Medium);
        assert_eq!(
            result.breakdown,
            vec![KeywordMatch {
                food: "banana".to_string(),
                base_calories: 105,
                quantity: 1,
                calories: 105,
            }]
        );
        assert_eq!(result.portion_size, None);
    }

    #[test]
    fn test_portion_scaling() {
        let result = estimator().estimate("large pizza");
        // 285 * 1.5 = 427.5
        assert_eq!(result.calories, 428);
        assert_eq!(result.confidence, Confidence::Medium);
        assert_eq!(result.portion_size.as_deref(), Some("large"));
        assert_eq!(foods(&result), vec!["pizza"]);
    }

    #[test]
    fn test_small_portion_rounds() {
        // 105 * 0.7 = 73.5
        let result = estimator().estimate("a small banana");
        assert_eq!(result.calories, 74);
        assert_eq!(result.portion_size.as_deref(), Some("small"));
    }

    #[test]
    fn test_quantity_and_multiple_foods() {
        let result = estimator().estimate("two eggs and toast");
        // "egg" and "eggs" are both substrings of the text and both count
        assert_eq!(foods(&result), vec!["egg", "eggs", "toast"]);
        assert_eq!(result.breakdown[0].quantity, 2);
        assert_eq!(result.breakdown[0].calories, 140);
        assert_eq!(result.breakdown[1].quantity, 2);
        assert_eq!(result.breakdown[2].calories, 80);
        assert_eq!(result.calories, 360);
        assert_eq!(result.confidence, Confidence::High);
    }

    #[test]
    fn test_three_eggs() {
        let result = estimator().estimate("3 eggs");
        let eggs = result.breakdown.iter().find(|m| m.food == "eggs").unwrap();
        assert_eq!(eggs.quantity, 3);
        assert_eq!(eggs.calories, 210);
    }

    #[test]
    fn test_distinct_foods_sum() {
        let result = estimator().estimate("banana and coffee");
        assert_eq!(result.confidence, Confidence::High);
        assert_eq!(result.calories, 105 + 5);
    }

    #[test]
    fn test_unknown_meal() {
        let result = estimator().estimate("xyz unrecognizable gibberish");
        assert_eq!(result.calories, 250);
        assert_eq!(result.confidence, Confidence::Low);
        assert_eq!(result.breakdown, vec![KeywordMatch::unknown_meal()]);
        assert_eq!(result.breakdown[0].food, UNKNOWN_MEAL);
    }

    #[test]
    fn test_portion_does_not_scale_default() {
        let result = estimator().estimate("large mystery dish");
        assert_eq!(result.calories, 250);
        assert_eq!(result.confidence, Confidence::Low);
        assert_eq!(result.portion_size.as_deref(), Some("large"));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let est = estimator();
        assert_eq!(est.estimate("  LARGE   Pizza "), est.estimate("large pizza"));
    }

    #[test]
    fn test_idempotent() {
        let est = estimator();
        let first = est.estimate("grilled chicken breast with rice");
        let second = est.estimate("grilled chicken breast with rice");
        assert_eq!(first, second);
    }

    #[test]
    fn test_overlapping_names_double_count() {
        let result = estimator().estimate("chicken breast");
        assert_eq!(foods(&result), vec!["chicken breast", "chicken"]);
        assert_eq!(result.calories, 330);
        assert_eq!(result.confidence, Confidence::High);
    }

    #[test]
    fn test_custom_tables() {
        let tables = CalorieTables::new(
            vec![FoodEntry::new("stew", 300)],
            vec![PortionEntry::new("double", 2.0)],
        )
        .unwrap();
        let result = estimate_calories(&tables, "Double stew");
        assert_eq!(result.calories, 600);
        assert_eq!(result.portion_size.as_deref(), Some("double"));
    }

    #[test]
    fn test_confidence_strings() {
        for c in [Confidence::None, Confidence::Low, Confidence::Medium, Confidence::High] {
            assert_eq!(Confidence::from_str(c.as_str()), c);
        }
        assert_eq!(Confidence::from_str("bogus"), Confidence::None);
    }

    #[test]
    fn test_result_json_shape() {
        let json = serde_json::to_value(estimator().estimate("banana")).unwrap();
        assert_eq!(json["confidence"], "medium");
        assert_eq!(json["breakdown"][0]["base_calories"], 105);
        assert!(json["portion_size"].is_null());
    }

    #[test]
    fn test_estimator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Estimator>();

        let est = estimator();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let est = est.clone();
                std::thread::spawn(move || est.estimate("banana").calories)
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 105);
        }
    }
}
