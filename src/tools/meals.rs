//! Meal MCP Tools
//!
//! Tools for estimating and logging meals.

use serde::Serialize;

use crate::db::Database;
use crate::estimator::{Confidence, EstimationResult, Estimator, KeywordMatch};
use crate::models::{CalorieBand, Meal, MealCreate, MealLog};

/// Message returned when a meal description is blank
pub const EMPTY_MEAL_MESSAGE: &str = "Please enter a meal description";

/// A meal as shown in list and add responses
#[derive(Debug, Serialize)]
pub struct MealSummary {
    pub id: i64,
    pub text: String,
    pub calories: i64,
    pub display_calories: String,
    pub confidence: Confidence,
    pub band: CalorieBand,
    pub portion_size: Option<String>,
    pub time: String,
    pub created_at: String,
}

impl From<&Meal> for MealSummary {
    fn from(meal: &Meal) -> Self {
        Self {
            id: meal.id,
            text: meal.text.clone(),
            calories: meal.calories,
            display_calories: meal.display_calories(),
            confidence: meal.confidence,
            band: meal.band(),
            portion_size: meal.portion_size.clone(),
            time: meal.display_time(),
            created_at: meal.created_at.clone(),
        }
    }
}

/// Response for add_meal
#[derive(Debug, Serialize)]
pub struct AddMealResponse {
    pub meal: MealSummary,
    pub breakdown: Vec<KeywordMatch>,
    pub total_calories: i64,
    pub total_band: CalorieBand,
    pub meal_count: usize,
}

/// Response for list_meals
#[derive(Debug, Serialize)]
pub struct ListMealsResponse {
    pub meals: Vec<MealSummary>,
    pub meal_count: usize,
    pub total_calories: i64,
    pub total_band: CalorieBand,
}

impl From<&MealLog> for ListMealsResponse {
    fn from(log: &MealLog) -> Self {
        Self {
            meals: log.meals().iter().map(MealSummary::from).collect(),
            meal_count: log.len(),
            total_calories: log.total_calories(),
            total_band: log.total_band(),
        }
    }
}

/// Response for remove_meal
#[derive(Debug, Serialize)]
pub struct RemoveMealResponse {
    pub success: bool,
    pub id: i64,
    pub total_calories: i64,
    pub meal_count: usize,
}

/// Response for clear_meals
#[derive(Debug, Serialize)]
pub struct ClearMealsResponse {
    pub success: bool,
    pub meals_removed: usize,
}

// ============================================================================
// Meal Tools
// ============================================================================

/// Estimate calories without logging anything
pub fn estimate_calories(estimator: &Estimator, text: &str) -> EstimationResult {
    estimator.estimate(text)
}

/// Estimate and log a meal
pub fn add_meal(db: &Database, estimator: &Estimator, text: &str) -> Result<AddMealResponse, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(EMPTY_MEAL_MESSAGE.to_string());
    }

    let estimate = estimator.estimate(text);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let mut log = MealLog::load(&conn)
        .map_err(|e| format!("Failed to load meals: {}", e))?;

    let meal = Meal::create(&conn, &MealCreate::from_estimate(text, &estimate))
        .map_err(|e| format!("Failed to log meal: {}", e))?;

    tracing::info!(
        "Logged meal {} '{}': {} ({} confidence)",
        meal.id,
        meal.text,
        meal.display_calories(),
        meal.confidence.as_str()
    );

    let summary = MealSummary::from(&meal);
    log.insert(meal);

    Ok(AddMealResponse {
        meal: summary,
        breakdown: estimate.breakdown,
        total_calories: log.total_calories(),
        total_band: log.total_band(),
        meal_count: log.len(),
    })
}

/// List all meals with the running total
pub fn list_meals(db: &Database) -> Result<ListMealsResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let log = MealLog::load(&conn)
        .map_err(|e| format!("Failed to list meals: {}", e))?;

    Ok(ListMealsResponse::from(&log))
}

/// Remove a meal by ID
pub fn remove_meal(db: &Database, id: i64) -> Result<RemoveMealResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let mut log = MealLog::load(&conn)
        .map_err(|e| format!("Failed to load meals: {}", e))?;

    let deleted = Meal::delete(&conn, id)
        .map_err(|e| format!("Failed to remove meal: {}", e))?;

    if deleted {
        log.remove(id);
        tracing::info!("Removed meal {}", id);
    }

    Ok(RemoveMealResponse {
        success: deleted,
        id,
        total_calories: log.total_calories(),
        meal_count: log.len(),
    })
}

/// Remove every meal; requires explicit confirmation
pub fn clear_meals(db: &Database, confirm: bool) -> Result<ClearMealsResponse, String> {
    if !confirm {
        return Err("Clearing all meals requires confirm=true".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let meals_removed = Meal::clear(&conn)
        .map_err(|e| format!("Failed to clear meals: {}", e))?;

    tracing::info!("Cleared {} meal(s)", meals_removed);

    Ok(ClearMealsResponse {
        success: true,
        meals_removed,
    })
}
