//! Calorie Tracker MCP Server Implementation
//!
//! Implements the MCP server with all calorie tracker tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::db::Database;
use crate::estimator::Estimator;
use crate::tools::meals;
use crate::tools::status::StatusTracker;

/// Calorie Tracker MCP Service
#[derive(Clone)]
pub struct CalorieService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    estimator: Estimator,
    tool_router: ToolRouter<CalorieService>,
}

impl CalorieService {
    pub fn new(database_path: PathBuf, database: Database, estimator: Estimator) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(
                database_path,
                estimator.tables(),
            ))),
            database,
            estimator,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Meal Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EstimateCaloriesParams {
    /// Free-text meal description, e.g. "two eggs and toast"
    pub text: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddMealParams {
    /// Free-text meal description, e.g. "large pizza"
    pub text: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemoveMealParams {
    /// Meal ID to remove
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ClearMealsParams {
    /// Must be true to delete every logged meal
    #[serde(default)]
    pub confirm: bool,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl CalorieService {
    // --- Status ---

    #[tool(description = "Get the current status of the calorie tracker including build info, database status, food table size, and process information")]
    async fn tracker_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get instructions for logging meals and reading calorie estimates. Call this when starting a food logging session.")]
    fn meal_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::MEAL_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(MEAL_INSTRUCTIONS)]))
    }

    // --- Meals ---

    #[tool(description = "Estimate calories for a meal description without logging it. Returns calories, confidence, and per-food breakdown.")]
    fn estimate_calories(&self, Parameters(p): Parameters<EstimateCaloriesParams>) -> Result<CallToolResult, McpError> {
        let result = meals::estimate_calories(&self.estimator, &p.text);
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Log a meal from a free-text description. Estimates calories and returns the new entry with the running total.")]
    fn add_meal(&self, Parameters(p): Parameters<AddMealParams>) -> Result<CallToolResult, McpError> {
        let result = meals::add_meal(&self.database, &self.estimator, &p.text).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List all logged meals, newest first, with the running calorie total")]
    fn list_meals(&self) -> Result<CallToolResult, McpError> {
        let result = meals::list_meals(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Remove a logged meal by ID")]
    fn remove_meal(&self, Parameters(p): Parameters<RemoveMealParams>) -> Result<CallToolResult, McpError> {
        let result = meals::remove_meal(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = if result.success {
            serde_json::to_string_pretty(&result)
        } else {
            Ok(format!(r#"{{"error": "Meal not found", "id": {}}}"#, p.id))
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Delete every logged meal. Requires confirm=true; confirm with the user before calling.")]
    fn clear_meals(&self, Parameters(p): Parameters<ClearMealsParams>) -> Result<CallToolResult, McpError> {
        let result = meals::clear_meals(&self.database, p.confirm).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for CalorieService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "calorie_tracker".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Calorie Tracker".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Calorie Tracker - free-text meal logging with calorie estimates. \
                 IMPORTANT: Call meal_instructions before logging food. \
                 Estimate only: estimate_calories. \
                 Meals: add_meal/list_meals/remove_meal, clear_meals (requires confirm=true). \
                 Status: tracker_status."
                    .into(),
            ),
        }
    }
}
