//! Activity query tools - live reads against the Strava API

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;

use crate::dates::{end_of_day_timestamp, parse_date, start_of_day_timestamp};
use crate::tools::{Tool, ToolContext, ToolResult};

/// Get the athlete's recent activities
pub struct GetActivitiesTool;

#[async_trait]
impl Tool for GetActivitiesTool {
    fn name(&self) -> &'static str {
        "get_activities"
    }

    fn description(&self) -> &'static str {
        "Get the authenticated athlete's recent activities."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of activities to return (default: 10)"
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        let client = match ctx.client() {
            Ok(client) => client,
            Err(e) => return ToolResult::error(e.to_string()),
        };
        let limit = input["limit"].as_u64().unwrap_or(10) as u32;

        match client.get_activities(limit, None, None).await {
            Ok(activities) => ToolResult::data(&activities),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

/// Get activities within a date range
pub struct GetActivitiesByDateRangeTool;

#[async_trait]
impl Tool for GetActivitiesByDateRangeTool {
    fn name(&self) -> &'static str {
        "get_activities_by_date_range"
    }

    fn description(&self) -> &'static str {
        "Get activities within a specific date range (ISO dates, inclusive)."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "start_date": {
                    "type": "string",
                    "description": "Start date in ISO format (YYYY-MM-DD)"
                },
                "end_date": {
                    "type": "string",
                    "description": "End date in ISO format (YYYY-MM-DD)"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of activities to return (default: 30)"
                }
            },
            "required": ["start_date", "end_date"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        let client = match ctx.client() {
            Ok(client) => client,
            Err(e) => return ToolResult::error(e.to_string()),
        };

        let (Some(start), Some(end)) = (input["start_date"].as_str(), input["end_date"].as_str()) else {
            return ToolResult::error("start_date and end_date are required");
        };

        let start = match parse_date(start) {
            Ok(date) => date,
            Err(e) => return ToolResult::error(e.to_string()),
        };
        let end = match parse_date(end) {
            Ok(date) => date,
            Err(e) => return ToolResult::error(e.to_string()),
        };

        let limit = input["limit"].as_u64().unwrap_or(30) as u32;
        let after = start_of_day_timestamp(start);
        let before = end_of_day_timestamp(end);

        match client.get_activities(limit, Some(before), Some(after)).await {
            Ok(activities) => ToolResult::data(&activities),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

/// Get a single activity by id
pub struct GetActivityByIdTool;

#[async_trait]
impl Tool for GetActivityByIdTool {
    fn name(&self) -> &'static str {
        "get_activity_by_id"
    }

    fn description(&self) -> &'static str {
        "Get detailed information about a specific activity."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "activity_id": {
                    "type": "integer",
                    "description": "ID of the activity to retrieve"
                }
            },
            "required": ["activity_id"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        let client = match ctx.client() {
            Ok(client) => client,
            Err(e) => return ToolResult::error(e.to_string()),
        };
        let Some(activity_id) = input["activity_id"].as_i64() else {
            return ToolResult::error("activity_id is required");
        };

        match client.get_activity(activity_id).await {
            Ok(activity) => ToolResult::data(&activity),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

/// Get activities from the past N days
pub struct GetRecentActivitiesTool;

#[async_trait]
impl Tool for GetRecentActivitiesTool {
    fn name(&self) -> &'static str {
        "get_recent_activities"
    }

    fn description(&self) -> &'static str {
        "Get activities from the past N days."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "days": {
                    "type": "integer",
                    "description": "Number of days to look back (default: 7)"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of activities to return (default: 10)"
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        let client = match ctx.client() {
            Ok(client) => client,
            Err(e) => return ToolResult::error(e.to_string()),
        };
        let days = input["days"].as_i64().unwrap_or(7);
        let limit = input["limit"].as_u64().unwrap_or(10) as u32;

        let after = (Utc::now() - Duration::days(days)).timestamp();
        match client.get_activities(limit, None, Some(after)).await {
            Ok(activities) => ToolResult::data(&activities),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

/// Get time-series stream data for an activity
pub struct GetActivityStreamsTool;

#[async_trait]
impl Tool for GetActivityStreamsTool {
    fn name(&self) -> &'static str {
        "get_activity_streams"
    }

    fn description(&self) -> &'static str {
        "Get stream data for an activity (heartrate, pace, altitude, cadence, ...)."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "activity_id": {
                    "type": "integer",
                    "description": "ID of the activity to retrieve streams for"
                },
                "stream_types": {
                    "type": "string",
                    "description": "Comma-separated stream types (default: \"heartrate,pace\")"
                }
            },
            "required": ["activity_id"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        let client = match ctx.client() {
            Ok(client) => client,
            Err(e) => return ToolResult::error(e.to_string()),
        };
        let Some(activity_id) = input["activity_id"].as_i64() else {
            return ToolResult::error("activity_id is required");
        };

        let stream_types = input["stream_types"].as_str().unwrap_or("heartrate,pace");
        let keys: Vec<&str> = stream_types.split(',').map(str::trim).collect();

        match client.get_activity_streams(activity_id, &keys).await {
            Ok(streams) => ToolResult::data(&streams),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}
