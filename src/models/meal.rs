//! Meal model
//!
//! A logged meal description with its calorie estimate.

use chrono::{DateTime, Local, TimeZone, Utc};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::estimator::{Confidence, EstimationResult};
use super::CalorieBand;

/// Timestamp format stored in `created_at`
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A logged meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: i64,
    pub text: String,
    pub calories: i64,
    pub confidence: Confidence,
    pub portion_size: Option<String>,
    pub created_at: String,  // ISO 8601 UTC: "2025-01-09T08:30:00Z"
}

/// Data for logging a new meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealCreate {
    pub text: String,
    pub calories: i64,
    pub confidence: Confidence,
    pub portion_size: Option<String>,
    /// Defaults to now
    pub created_at: Option<String>,
}

impl MealCreate {
    /// Build a meal record from a description and its estimate
    pub fn from_estimate(text: &str, estimate: &EstimationResult) -> Self {
        Self {
            text: text.to_string(),
            calories: i64::try_from(estimate.calories).unwrap_or(i64::MAX),
            confidence: estimate.confidence,
            portion_size: estimate.portion_size.clone(),
            created_at: None,
        }
    }
}

impl Meal {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let confidence: String = row.get("confidence")?;
        Ok(Self {
            id: row.get("id")?,
            text: row.get("text")?,
            calories: row.get("calories")?,
            confidence: Confidence::from_str(&confidence),
            portion_size: row.get("portion_size")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Log a new meal
    pub fn create(conn: &Connection, data: &MealCreate) -> DbResult<Self> {
        let created_at = data
            .created_at
            .clone()
            .unwrap_or_else(|| Utc::now().format(TIMESTAMP_FORMAT).to_string());

        conn.execute(
            r#"
            INSERT INTO meals (text, calories, confidence, portion_size, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                data.text,
                data.calories,
                data.confidence.as_str(),
                data.portion_size,
                created_at,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a meal by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM meals WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(meal) => Ok(Some(meal)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all meals, newest first
    pub fn list_all(conn: &Connection) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM meals ORDER BY created_at DESC, id DESC")?;

        let meals = stmt
            .query_map([], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(meals)
    }

    /// Sum of calories over all meals
    pub fn total_calories(conn: &Connection) -> DbResult<i64> {
        let total: i64 = conn.query_row(
            "SELECT COALESCE(SUM(calories), 0) FROM meals",
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Delete a meal
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM meals WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }

    /// Delete every meal, returning how many were removed
    pub fn clear(conn: &Connection) -> DbResult<usize> {
        let rows = conn.execute("DELETE FROM meals", [])?;
        Ok(rows)
    }

    pub fn band(&self) -> CalorieBand {
        CalorieBand::classify(self.calories)
    }

    /// Calories for display; default estimates are marked approximate with "~"
    pub fn display_calories(&self) -> String {
        let marker = if self.confidence == Confidence::Low { "~" } else { "" };
        format!("{}{} cal", marker, self.calories)
    }

    /// Local time of day the meal was logged, e.g. "8:05 AM"
    pub fn display_time(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.created_at) {
            Ok(ts) => format_time_of_day(&ts.with_timezone(&Local)),
            Err(_) => self.created_at.clone(),
        }
    }
}

/// Format a timestamp as a 12-hour clock time
pub fn format_time_of_day<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    ts.format("%-I:%M %p").to_string()
}
