//! MCP server module
//!
//! Exposes the calorie tracker tools over the Model Context Protocol.

mod server;

pub use server::CalorieService;
