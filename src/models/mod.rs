//! Data models
//!
//! Rust structs representing logged meals.

mod calorie_band;
mod meal;
mod meal_log;

pub use calorie_band::CalorieBand;
pub use meal::{format_time_of_day, Meal, MealCreate};
pub use meal_log::MealLog;
