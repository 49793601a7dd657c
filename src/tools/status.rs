//! Calorie Tracker Status Tool
//!
//! Provides runtime status information about the calorie tracker service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::estimator::CalorieTables;

/// Meal logging instructions for AI assistants
pub const MEAL_INSTRUCTIONS: &str = r#"
# Calorie Tracker Meal Logging Instructions

Meals are logged as free text. The tracker recognizes known food names in the
text and estimates calories from a fixed food table.

## Logging a Meal

**Tool:** `add_meal(text)`
- Pass the user's description as written, e.g. `"two eggs and toast"`
- Blank text is rejected
- The response includes the new meal, the per-food breakdown, and the running total

To preview an estimate without logging it, use `estimate_calories(text)`.

## How Estimates Work

1. Text is lowercased and whitespace is collapsed
2. Every known food name contained in the text counts once
3. A count right before a food multiplies it: `"3 eggs"`, `"two tacos"` (digits or one..ten)
4. A size word scales the whole meal: small ×0.7, medium ×1.0, large ×1.5, extra large/xl ×2.0
   (only the first size word found in table order applies)
5. Nothing recognized → 250 calories with low confidence

### Confidence
| Value | Meaning |
|-------|---------|
| none | empty text |
| low | no food recognized, default 250 used (shown as `~250 cal`) |
| medium | exactly one food recognized |
| high | two or more foods recognized |

### Caveat: Overlapping Names
Names are matched as substrings, so `"chicken breast"` matches both "chicken breast"
and "chicken", and `"eggs"` matches both "egg" and "eggs". Each counts. If the total
looks doubled, tell the user and suggest rewording.

## Reviewing and Correcting

- `list_meals`: all meals newest first, with the running total
- `remove_meal(id)`: delete one entry
- `clear_meals(confirm: true)`: delete everything; always confirm with the user first

## Calorie Bands
Meals and totals are tagged `low` (≤200), `medium` (≤500), or `high` (>500).
"#;

/// Runtime status of the calorie tracker service
#[derive(Debug, Clone, Serialize)]
pub struct TrackerStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Lookup table sizes
    pub food_count: usize,
    pub portion_count: usize,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
    food_count: usize,
    portion_count: usize,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(database_path: PathBuf, tables: &CalorieTables) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
            food_count: tables.foods().len(),
            portion_count: tables.portions().len(),
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> TrackerStatus {
        let build_info = BuildInfo::current();

        // Get database size if it exists
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        TrackerStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            food_count: self.food_count,
            portion_count: self.portion_count,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_tables_and_process() {
        let tables = CalorieTables::builtin().unwrap();
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/calorie_tracker.db"), &tables);
        let status = tracker.get_status();

        assert_eq!(status.food_count, 128);
        assert_eq!(status.portion_count, 5);
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.version, env!("CARGO_PKG_VERSION"));
    }
}
