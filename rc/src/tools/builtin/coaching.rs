//! Coaching memory tools - persona, profile, and session notes
//!
//! These are what give the agent continuity: `get_coaching_context` loads the
//! accumulated memory at the start of a conversation, the others write new
//! memory as the conversation produces it.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::NoteType;
use crate::tools::{Tool, ToolContext, ToolResult};

/// How many recent notes the context carries
const CONTEXT_NOTES: usize = 10;

/// How many recent adjustments the context carries
const CONTEXT_ADJUSTMENTS: usize = 5;

fn athlete_id(input: &Value) -> String {
    input["athlete_id"].as_str().unwrap_or("default").to_string()
}

/// Load the coaching context for starting a conversation
pub struct GetCoachingContextTool;

#[async_trait]
impl Tool for GetCoachingContextTool {
    fn name(&self) -> &'static str {
        "get_coaching_context"
    }

    fn description(&self) -> &'static str {
        "Load the coaching persona, athlete profile, recent session notes, and active plan summary. Call at the start of coaching conversations."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "athlete_id": {
                    "type": "string",
                    "description": "Athlete identifier (default for single-user mode)"
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        let athlete_id = athlete_id(&input);

        let persona = match ctx.coaching.persona() {
            Ok(persona) => persona,
            Err(e) => return ToolResult::error(e.to_string()),
        };
        let profile = match ctx.coaching.profile(&athlete_id) {
            Ok(profile) => profile,
            Err(e) => return ToolResult::error(e.to_string()),
        };
        let notes = match ctx.coaching.session_notes(&athlete_id) {
            Ok(mut notes) => {
                notes.truncate(CONTEXT_NOTES);
                notes
            }
            Err(e) => return ToolResult::error(e.to_string()),
        };
        let adjustments = match ctx.coaching.plan_adjustments(&athlete_id) {
            Ok(mut adjustments) => {
                adjustments.truncate(CONTEXT_ADJUSTMENTS);
                adjustments
            }
            Err(e) => return ToolResult::error(e.to_string()),
        };

        // First active plan, by upcoming race date
        let active_plan = match ctx.plans.list() {
            Ok(plans) => plans.into_iter().find(|p| p.is_active).map(|p| {
                serde_json::json!({
                    "plan_id": p.id,
                    "plan_name": p.plan_name,
                    "race_name": p.race_name,
                    "race_date": p.race_date,
                })
            }),
            Err(e) => return ToolResult::error(e.to_string()),
        };

        ToolResult::data(&serde_json::json!({
            "coaching_persona": persona,
            "athlete_profile": profile,
            "recent_notes": notes,
            "recent_adjustments": adjustments,
            "active_plan": active_plan,
        }))
    }
}

/// Persist a coaching note across conversations
pub struct SaveCoachingNoteTool;

#[async_trait]
impl Tool for SaveCoachingNoteTool {
    fn name(&self) -> &'static str {
        "save_coaching_note"
    }

    fn description(&self) -> &'static str {
        "Save a coaching note (session_summary, insight, or adjustment) to persist across conversations."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "note_type": {
                    "type": "string",
                    "description": "Type of note: session_summary, insight, or adjustment"
                },
                "content_json": {
                    "type": "string",
                    "description": "JSON object with the note content (summary, key_points, ...)"
                },
                "athlete_id": {
                    "type": "string",
                    "description": "Athlete identifier"
                }
            },
            "required": ["note_type", "content_json"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        let Some(note_type) = input["note_type"].as_str() else {
            return ToolResult::error("note_type is required");
        };
        let note_type: NoteType = match note_type.parse() {
            Ok(note_type) => note_type,
            Err(e) => return ToolResult::error(e),
        };

        let Some(content_json) = input["content_json"].as_str() else {
            return ToolResult::error("content_json is required");
        };
        let content: Value = match serde_json::from_str(content_json) {
            Ok(content) => content,
            Err(e) => return ToolResult::error(format!("Invalid JSON: {}", e)),
        };
        let Value::Object(content) = content else {
            return ToolResult::error("content_json must be a JSON object");
        };

        match ctx.coaching.add_session_note(note_type, content, &athlete_id(&input)) {
            Ok(note) => ToolResult::data(&serde_json::json!({"saved": true, "note": note})),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

/// Update the athlete's profile
pub struct UpdateAthleteProfileTool;

#[async_trait]
impl Tool for UpdateAthleteProfileTool {
    fn name(&self) -> &'static str {
        "update_athlete_profile"
    }

    fn description(&self) -> &'static str {
        "Update the athlete's profile (name, training preferences, goals, injury history, notes)."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "updates_json": {
                    "type": "string",
                    "description": "JSON object with the profile fields to update"
                },
                "athlete_id": {
                    "type": "string",
                    "description": "Athlete identifier"
                }
            },
            "required": ["updates_json"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        let Some(updates_json) = input["updates_json"].as_str() else {
            return ToolResult::error("updates_json is required");
        };
        let updates: Value = match serde_json::from_str(updates_json) {
            Ok(updates) => updates,
            Err(e) => return ToolResult::error(format!("Invalid JSON: {}", e)),
        };

        match ctx.coaching.update_profile(updates, &athlete_id(&input)) {
            Ok(profile) => ToolResult::data(&serde_json::json!({"updated": true, "profile": profile})),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}
