//! Training plan tools - CRUD over stored plans plus adherence analysis

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::TrainingPlan;
use crate::report::adherence;
use crate::tools::{Tool, ToolContext, ToolResult};

/// Save a training plan
pub struct SaveTrainingPlanTool;

#[async_trait]
impl Tool for SaveTrainingPlanTool {
    fn name(&self) -> &'static str {
        "save_training_plan"
    }

    fn description(&self) -> &'static str {
        "Save a training plan. The agent translates the user's description into the plan JSON schema before calling this."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "plan_json": {
                    "type": "string",
                    "description": "JSON string containing the training plan data"
                },
                "plan_id": {
                    "type": "string",
                    "description": "Optional plan ID. Generated when not provided."
                }
            },
            "required": ["plan_json"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        let Some(plan_json) = input["plan_json"].as_str() else {
            return ToolResult::error("plan_json is required");
        };

        let plan: TrainingPlan = match serde_json::from_str(plan_json) {
            Ok(plan) => plan,
            Err(e) => return ToolResult::error(format!("Invalid plan JSON: {}", e)),
        };
        let plan_name = plan.plan_name.clone();
        let plan_id = input["plan_id"].as_str().map(str::to_string);

        match ctx.plans.save(plan, plan_id) {
            Ok(saved_id) => ToolResult::data(&serde_json::json!({
                "plan_id": saved_id,
                "saved": true,
                "plan_name": plan_name,
            })),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

/// List all saved training plans
pub struct ListTrainingPlansTool;

#[async_trait]
impl Tool for ListTrainingPlansTool {
    fn name(&self) -> &'static str {
        "list_training_plans"
    }

    fn description(&self) -> &'static str {
        "List all saved training plans with id, name, race date, and active flag."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, _input: Value, ctx: &ToolContext) -> ToolResult {
        match ctx.plans.list() {
            Ok(plans) => ToolResult::data(&serde_json::json!({
                "count": plans.len(),
                "plans": plans,
            })),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

/// Get a training plan by id
pub struct GetTrainingPlanTool;

#[async_trait]
impl Tool for GetTrainingPlanTool {
    fn name(&self) -> &'static str {
        "get_training_plan"
    }

    fn description(&self) -> &'static str {
        "Get the full training plan data by ID."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "plan_id": {
                    "type": "string",
                    "description": "The plan ID to retrieve"
                }
            },
            "required": ["plan_id"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        let Some(plan_id) = input["plan_id"].as_str() else {
            return ToolResult::error("plan_id is required");
        };

        match ctx.plans.get(plan_id) {
            Ok(Some(plan)) => ToolResult::data(&plan),
            Ok(None) => ToolResult::error(format!("Plan not found: {}", plan_id)),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

/// Update an existing training plan
pub struct UpdateTrainingPlanTool;

#[async_trait]
impl Tool for UpdateTrainingPlanTool {
    fn name(&self) -> &'static str {
        "update_training_plan"
    }

    fn description(&self) -> &'static str {
        "Update an existing training plan by merging the given fields into it."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "plan_id": {
                    "type": "string",
                    "description": "The plan ID to update"
                },
                "updates_json": {
                    "type": "string",
                    "description": "JSON string containing the fields to update"
                }
            },
            "required": ["plan_id", "updates_json"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        let Some(plan_id) = input["plan_id"].as_str() else {
            return ToolResult::error("plan_id is required");
        };
        let Some(updates_json) = input["updates_json"].as_str() else {
            return ToolResult::error("updates_json is required");
        };

        let updates: Value = match serde_json::from_str(updates_json) {
            Ok(updates) => updates,
            Err(e) => return ToolResult::error(format!("Invalid JSON: {}", e)),
        };

        match ctx.plans.update(plan_id, updates) {
            Ok(Some(plan)) => ToolResult::data(&serde_json::json!({
                "plan_id": plan_id,
                "updated": true,
                "plan": plan,
            })),
            Ok(None) => ToolResult::error(format!("Plan not found: {}", plan_id)),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

/// Delete a training plan
pub struct DeleteTrainingPlanTool;

#[async_trait]
impl Tool for DeleteTrainingPlanTool {
    fn name(&self) -> &'static str {
        "delete_training_plan"
    }

    fn description(&self) -> &'static str {
        "Delete a training plan by ID."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "plan_id": {
                    "type": "string",
                    "description": "The plan ID to delete"
                }
            },
            "required": ["plan_id"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        let Some(plan_id) = input["plan_id"].as_str() else {
            return ToolResult::error("plan_id is required");
        };

        match ctx.plans.delete(plan_id) {
            Ok(true) => ToolResult::data(&serde_json::json!({"plan_id": plan_id, "deleted": true})),
            Ok(false) => ToolResult::error(format!("Plan not found: {}", plan_id)),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

/// Compare a plan against the mirrored runs
pub struct AnalyzePlanAdherenceTool;

#[async_trait]
impl Tool for AnalyzePlanAdherenceTool {
    fn name(&self) -> &'static str {
        "analyze_plan_adherence"
    }

    fn description(&self) -> &'static str {
        "Analyze how well actual training matches the plan: completion rate, missed workouts, and upcoming workouts."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "plan_id": {
                    "type": "string",
                    "description": "The plan ID to analyze"
                }
            },
            "required": ["plan_id"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        let Some(plan_id) = input["plan_id"].as_str() else {
            return ToolResult::error("plan_id is required");
        };

        let plan = match ctx.plans.get(plan_id) {
            Ok(Some(plan)) => plan,
            Ok(None) => return ToolResult::error(format!("Plan not found: {}", plan_id)),
            Err(e) => return ToolResult::error(e.to_string()),
        };

        let runs = match ctx.runs.load_all() {
            Ok(runs) => runs,
            Err(e) => return ToolResult::error(e.to_string()),
        };

        ToolResult::data(&adherence::analyze(&plan, &runs, ctx.today()))
    }
}
