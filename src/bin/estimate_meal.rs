//! Utility to estimate a meal from the command line
//!
//! Usage: estimate_meal two eggs and toast
//!
//! Prints the estimate as JSON. Set CALORIE_TRACKER_DATA_PATH to use a
//! custom calorie table instead of the built-in one.

use calorie_tracker::estimator::{CalorieTables, Estimator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    let tables = match std::env::var("CALORIE_TRACKER_DATA_PATH") {
        Ok(path) => CalorieTables::load(path)?,
        Err(_) => CalorieTables::builtin()?,
    };

    let result = Estimator::new(tables).estimate(&text);
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
