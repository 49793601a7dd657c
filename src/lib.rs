//! Calorie Tracker Library
//!
//! Free-text meal logging with keyword-based calorie estimation.

pub mod build_info;
pub mod db;
pub mod estimator;
pub mod mcp;
pub mod models;
pub mod tools;
