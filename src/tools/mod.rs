//! MCP Tools
//!
//! Tool implementations for the calorie tracker MCP server.

pub mod meals;
pub mod status;
