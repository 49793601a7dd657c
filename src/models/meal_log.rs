//! Meal log
//!
//! An ordered, caller-owned collection of logged meals, newest first.
//! Callers load it from the store, pass it to whatever needs the running
//! total, and keep it in step with their own writes.

use rusqlite::Connection;
use serde::Serialize;

use crate::db::DbResult;
use super::{CalorieBand, Meal};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MealLog {
    meals: Vec<Meal>,
}

impl MealLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every stored meal, newest first
    pub fn load(conn: &Connection) -> DbResult<Self> {
        Ok(Self {
            meals: Meal::list_all(conn)?,
        })
    }

    /// Add a meal at the front of the log
    pub fn insert(&mut self, meal: Meal) {
        self.meals.insert(0, meal);
    }

    /// Remove a meal by ID
    pub fn remove(&mut self, id: i64) -> Option<Meal> {
        let index = self.meals.iter().position(|m| m.id == id)?;
        Some(self.meals.remove(index))
    }

    /// Remove every meal, returning how many were dropped
    pub fn clear(&mut self) -> usize {
        let count = self.meals.len();
        self.meals.clear();
        count
    }

    pub fn get(&self, id: i64) -> Option<&Meal> {
        self.meals.iter().find(|m| m.id == id)
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    /// Running total over every meal in the log
    pub fn total_calories(&self) -> i64 {
        self.meals.iter().map(|m| m.calories).sum()
    }

    pub fn total_band(&self) -> CalorieBand {
        CalorieBand::classify(self.total_calories())
    }
}

impl IntoIterator for MealLog {
    type Item = Meal;
    type IntoIter = std::vec::IntoIter<Meal>;

    fn into_iter(self) -> Self::IntoIter {
        self.meals.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::estimator::Confidence;
    use crate::models::MealCreate;

    fn meal(id: i64, text: &str, calories: i64) -> Meal {
        Meal {
            id,
            text: text.to_string(),
            calories,
            confidence: Confidence::Medium,
            portion_size: None,
            created_at: "2025-01-09T08:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_empty_log() {
        let log = MealLog::new();
        assert!(log.is_empty());
        assert_eq!(log.total_calories(), 0);
        assert_eq!(log.total_band(), CalorieBand::Low);
    }

    #[test]
    fn test_insert_newest_first() {
        let mut log = MealLog::new();
        log.insert(meal(1, "banana", 105));
        log.insert(meal(2, "burger", 540));

        let ids: Vec<i64> = log.meals().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(log.total_calories(), 645);
        assert_eq!(log.total_band(), CalorieBand::High);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut log = MealLog::new();
        log.insert(meal(1, "banana", 105));
        log.insert(meal(2, "toast", 80));
        log.insert(meal(3, "soup", 150));

        assert_eq!(log.remove(2).map(|m| m.text), Some("toast".to_string()));
        assert_eq!(log.remove(2), None);
        assert_eq!(log.len(), 2);
        assert_eq!(log.total_calories(), 255);
        assert!(log.get(3).is_some());

        assert_eq!(log.clear(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn test_logs_are_independent() {
        let mut first = MealLog::new();
        let second = MealLog::new();
        first.insert(meal(1, "banana", 105));
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn test_load_matches_store() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        for (text, calories, at) in [
            ("banana", 105, "2025-01-09T08:00:00Z"),
            ("pizza", 285, "2025-01-09T12:00:00Z"),
        ] {
            Meal::create(
                &conn,
                &MealCreate {
                    text: text.to_string(),
                    calories,
                    confidence: Confidence::Medium,
                    portion_size: None,
                    created_at: Some(at.to_string()),
                },
            )
            .unwrap();
        }

        let log = MealLog::load(&conn).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.meals()[0].text, "pizza");
        assert_eq!(log.total_calories(), Meal::total_calories(&conn).unwrap());

        let texts: Vec<String> = log.into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["pizza", "banana"]);
    }
}
