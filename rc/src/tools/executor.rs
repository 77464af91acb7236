//! ToolExecutor - registry and dispatch for the agent-facing tools

use std::collections::HashMap;

use serde_json::Value;

use super::builtin::{
    AnalyzePlanAdherenceTool, DeleteTrainingPlanTool, GetActivitiesByDateRangeTool, GetActivitiesTool,
    GetActivityByIdTool, GetActivityStreamsTool, GetCoachingContextTool, GetRecentActivitiesTool,
    GetTrainingPlanTool, GetTrainingReportTool, ListTrainingPlansTool, SaveCoachingNoteTool, SaveTrainingPlanTool,
    UpdateAthleteProfileTool, UpdateTrainingPlanTool,
};
use super::{Tool, ToolContext, ToolDefinition, ToolError, ToolResult};

/// Manages tool registration and execution
pub struct ToolExecutor {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolExecutor {
    /// Create executor with the standard tool set
    pub fn standard() -> Self {
        let mut executor = Self::empty();

        // Activity queries
        executor.add_tool(Box::new(GetActivitiesTool));
        executor.add_tool(Box::new(GetActivitiesByDateRangeTool));
        executor.add_tool(Box::new(GetActivityByIdTool));
        executor.add_tool(Box::new(GetRecentActivitiesTool));
        executor.add_tool(Box::new(GetActivityStreamsTool));

        // Training plans
        executor.add_tool(Box::new(SaveTrainingPlanTool));
        executor.add_tool(Box::new(ListTrainingPlansTool));
        executor.add_tool(Box::new(GetTrainingPlanTool));
        executor.add_tool(Box::new(UpdateTrainingPlanTool));
        executor.add_tool(Box::new(DeleteTrainingPlanTool));
        executor.add_tool(Box::new(AnalyzePlanAdherenceTool));

        // Coaching memory
        executor.add_tool(Box::new(GetCoachingContextTool));
        executor.add_tool(Box::new(SaveCoachingNoteTool));
        executor.add_tool(Box::new(UpdateAthleteProfileTool));

        // Reports
        executor.add_tool(Box::new(GetTrainingReportTool));

        executor
    }

    /// Create an empty executor (for testing)
    pub fn empty() -> Self {
        Self { tools: HashMap::new() }
    }

    /// Add a tool to the executor
    pub fn add_tool(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get tool definitions for the agent runtime
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.input_schema(),
            })
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, input: Value, ctx: &ToolContext) -> ToolResult {
        match self.tools.get(name) {
            Some(tool) => tool.execute(input, ctx).await,
            None => ToolResult::error(
                ToolError::UnknownTool {
                    name: name.to_string(),
                }
                .to_string(),
            ),
        }
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get tool names
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::standard()
    }
}
