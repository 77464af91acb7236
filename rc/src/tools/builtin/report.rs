//! Training report tool

use async_trait::async_trait;
use serde_json::Value;

use crate::report::{stats, sync};
use crate::tools::{Tool, ToolContext, ToolResult};

/// Build the full training report, optionally refreshing the mirror first
pub struct GetTrainingReportTool;

#[async_trait]
impl Tool for GetTrainingReportTool {
    fn name(&self) -> &'static str {
        "get_training_report"
    }

    fn description(&self) -> &'static str {
        "Get a comprehensive training report: overall summary, weekly breakdowns, and individual runs with lap splits. Optionally fetches the latest runs from Strava first."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "refresh": {
                    "type": "boolean",
                    "description": "Fetch latest data from Strava first (default: true). Set false to use only locally cached data."
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        let refresh = input["refresh"].as_bool().unwrap_or(true);

        let mut new_runs_fetched = None;
        if refresh {
            let client = match ctx.client() {
                Ok(client) => client,
                Err(e) => return ToolResult::error(e.to_string()),
            };
            match sync::fetch_and_save_new_runs(client, &ctx.runs, ctx.sync.lookback_weeks, ctx.sync.fetch_limit).await
            {
                Ok(count) => new_runs_fetched = Some(count),
                Err(e) => return ToolResult::error(e.to_string()),
            }
        }

        let runs = match ctx.runs.load_all() {
            Ok(runs) => runs,
            Err(e) => return ToolResult::error(e.to_string()),
        };

        let report = stats::build_report(&runs);
        let mut payload = serde_json::json!({ "report": report });
        if runs.is_empty() {
            payload["message"] = "No run data found. Make sure you have running activities on Strava.".into();
        }
        if let Some(count) = new_runs_fetched {
            payload["new_runs_fetched"] = count.into();
        }

        ToolResult::data(&payload)
    }
}
