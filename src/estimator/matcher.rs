//! Food keyword matching

use super::quantity::extract_quantity;
use super::tables::FoodCalorieTable;
use super::KeywordMatch;

/// Foods recognized in a meal description and their summed calories
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordMatches {
    pub matches: Vec<KeywordMatch>,
    pub total_calories: u64,
}

/// Match every food name contained in the normalized text
///
/// Foods are visited in table order and each name is counted at most once.
/// Matching is plain substring containment, so nested names such as
/// "chicken" and "chicken breast" both match and both count.
pub fn find_keyword_matches(text: &str, foods: &FoodCalorieTable) -> KeywordMatches {
    let mut result = KeywordMatches::default();

    for entry in foods.iter() {
        if !text.contains(entry.name.as_str()) {
            continue;
        }
        if result.matches.iter().any(|m| m.food == entry.name) {
            continue;
        }

        let quantity = extract_quantity(text, &entry.name);
        let item = KeywordMatch::new(&entry.name, entry.calories, quantity);
        result.total_calories += item.calories;
        result.matches.push(item);
    }

    result
}
