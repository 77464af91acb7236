//! Integration tests for runcoach
//!
//! These exercise the agent-facing tool registry end-to-end against temp-dir
//! stores. No network: activity tools are checked for their fail-soft path
//! and report tools run with refresh disabled.

use chrono::NaiveDate;
use serde_json::{Value, json};
use tempfile::TempDir;

use runcoach::config::Config;
use runcoach::store::RunStore;
use runcoach::strava::StoredRun;
use runcoach::tools::{ToolContext, ToolExecutor};

fn test_ctx(temp: &TempDir) -> ToolContext {
    let mut config = Config::default();
    config.storage.data_dir = temp.path().to_path_buf();
    ToolContext::new(&config, None)
        .expect("Failed to build tool context")
        .with_today(NaiveDate::from_ymd_opt(2026, 7, 15).unwrap())
}

fn seed_run(temp: &TempDir, id: i64, start: &str, distance_m: f64, time_s: u64) {
    let run: StoredRun = serde_json::from_value(json!({
        "id": id,
        "name": "Evening Run",
        "sport_type": "Run",
        "start_date": start,
        "distance": distance_m,
        "moving_time": time_s,
        "average_speed": distance_m / time_s as f64,
        "total_elevation_gain": 40.0
    }))
    .expect("Failed to build run");
    RunStore::open(temp.path()).unwrap().save(&run).unwrap();
}

fn sample_plan_json() -> String {
    json!({
        "plan_name": "Half Build",
        "goal_race": {
            "date": "2026-09-20",
            "race_type": "half_marathon",
            "distance_km": 21.1,
            "goal_time": "1:39:00",
            "goal_pace_min_per_km": "4:42",
            "race_name": "City Half"
        },
        "plan_start_date": "2026-07-06",
        "plan_end_date": "2026-09-20",
        "weeks": [{
            "week_number": 1,
            "week_start_date": "2026-07-06",
            "runs": [
                {"day_of_week": "Tuesday", "date": "2026-07-07", "type": "easy", "distance_km": 10.0},
                {"day_of_week": "Thursday", "date": "2026-07-09", "type": "workout", "distance_km": 12.0},
                {"day_of_week": "Saturday", "date": "2026-07-18", "type": "long_run", "distance_km": 26.0}
            ]
        }]
    })
    .to_string()
}

fn parse_data(result: &runcoach::ToolResult) -> Value {
    assert!(!result.is_error, "tool failed: {}", result.content);
    let value: Value = serde_json::from_str(&result.content).expect("tool result is not JSON");
    value["data"].clone()
}

// =============================================================================
// Training plan tools
// =============================================================================

#[tokio::test]
async fn test_plan_lifecycle_through_tools() {
    let temp = TempDir::new().unwrap();
    let ctx = test_ctx(&temp);
    let executor = ToolExecutor::standard();

    // Save
    let result = executor
        .execute("save_training_plan", json!({"plan_json": sample_plan_json()}), &ctx)
        .await;
    let data = parse_data(&result);
    let plan_id = data["plan_id"].as_str().unwrap().to_string();
    assert_eq!(data["saved"], true);
    assert_eq!(data["plan_name"], "Half Build");

    // List
    let result = executor.execute("list_training_plans", json!({}), &ctx).await;
    let data = parse_data(&result);
    assert_eq!(data["count"], 1);
    assert_eq!(data["plans"][0]["race_name"], "City Half");

    // Get
    let result = executor.execute("get_training_plan", json!({"plan_id": plan_id}), &ctx).await;
    let data = parse_data(&result);
    assert_eq!(data["plan_name"], "Half Build");
    assert_eq!(data["weeks"][0]["runs"][0]["type"], "easy");

    // Update (nested merge)
    let result = executor
        .execute(
            "update_training_plan",
            json!({
                "plan_id": plan_id,
                "updates_json": json!({"goal_race": {"goal_time": "1:37:30"}}).to_string()
            }),
            &ctx,
        )
        .await;
    let data = parse_data(&result);
    assert_eq!(data["plan"]["goal_race"]["goal_time"], "1:37:30");
    assert_eq!(data["plan"]["goal_race"]["race_name"], "City Half");

    // Delete
    let result = executor.execute("delete_training_plan", json!({"plan_id": plan_id}), &ctx).await;
    assert_eq!(parse_data(&result)["deleted"], true);

    let result = executor.execute("get_training_plan", json!({"plan_id": plan_id}), &ctx).await;
    assert!(result.is_error);
    assert!(result.content.contains("not found"));
}

#[tokio::test]
async fn test_save_plan_rejects_invalid_json() {
    let temp = TempDir::new().unwrap();
    let ctx = test_ctx(&temp);
    let executor = ToolExecutor::standard();

    let result = executor
        .execute("save_training_plan", json!({"plan_json": "{not json"}), &ctx)
        .await;
    assert!(result.is_error);
    assert!(result.content.contains("Invalid plan JSON"));

    let result = executor
        .execute("save_training_plan", json!({"plan_json": "{\"plan_name\": \"no race\"}"}), &ctx)
        .await;
    assert!(result.is_error, "plan missing required fields must be rejected");
}

#[tokio::test]
async fn test_adherence_matches_seeded_runs() {
    let temp = TempDir::new().unwrap();
    // One day before the easy run on 2026-07-07, three days off the workout
    // on 2026-07-09: matches the first, misses the second
    seed_run(&temp, 1, "2026-07-06T06:30:00Z", 10_200.0, 3060);
    let ctx = test_ctx(&temp);
    let executor = ToolExecutor::standard();

    let result = executor
        .execute("save_training_plan", json!({"plan_json": sample_plan_json()}), &ctx)
        .await;
    let plan_id = parse_data(&result)["plan_id"].as_str().unwrap().to_string();

    let result = executor
        .execute("analyze_plan_adherence", json!({"plan_id": plan_id}), &ctx)
        .await;
    let data = parse_data(&result);

    assert_eq!(data["workouts_completed"], 1);
    assert_eq!(data["workouts_missed"], 1);
    assert_eq!(data["completion_rate"], 50.0);

    // The long run on 07-18 is within the 7-day upcoming window of 07-15
    assert_eq!(data["upcoming_workouts"].as_array().unwrap().len(), 1);
    assert_eq!(data["upcoming_workouts"][0]["days_away"], 3);
}

#[tokio::test]
async fn test_adherence_unknown_plan() {
    let temp = TempDir::new().unwrap();
    let ctx = test_ctx(&temp);
    let executor = ToolExecutor::standard();

    let result = executor
        .execute("analyze_plan_adherence", json!({"plan_id": "nope1234"}), &ctx)
        .await;
    assert!(result.is_error);
    assert!(result.content.contains("Plan not found"));
}

// =============================================================================
// Report tool
// =============================================================================

#[tokio::test]
async fn test_training_report_from_local_data() {
    let temp = TempDir::new().unwrap();
    seed_run(&temp, 1, "2026-07-07T06:30:00Z", 10_000.0, 3000);
    seed_run(&temp, 2, "2026-07-09T06:30:00Z", 12_000.0, 3600);
    let ctx = test_ctx(&temp);
    let executor = ToolExecutor::standard();

    let result = executor.execute("get_training_report", json!({"refresh": false}), &ctx).await;
    let data = parse_data(&result);

    assert_eq!(data["report"]["overall_summary"]["total_runs"], 2);
    assert_eq!(data["report"]["overall_summary"]["total_distance_km"], 22.0);
    assert_eq!(data["report"]["individual_runs"].as_array().unwrap().len(), 2);
    assert!(data.get("new_runs_fetched").is_none(), "no fetch without refresh");
}

#[tokio::test]
async fn test_training_report_empty_mirror_has_message() {
    let temp = TempDir::new().unwrap();
    let ctx = test_ctx(&temp);
    let executor = ToolExecutor::standard();

    let result = executor.execute("get_training_report", json!({"refresh": false}), &ctx).await;
    let data = parse_data(&result);

    assert_eq!(data["report"]["overall_summary"]["total_runs"], 0);
    assert!(data["message"].as_str().unwrap().contains("No run data"));
}

#[tokio::test]
async fn test_training_report_refresh_requires_client() {
    let temp = TempDir::new().unwrap();
    let ctx = test_ctx(&temp);
    let executor = ToolExecutor::standard();

    let result = executor.execute("get_training_report", json!({"refresh": true}), &ctx).await;
    assert!(result.is_error);
    assert!(result.content.contains("not initialized"));
}

// =============================================================================
// Coaching tools
// =============================================================================

#[tokio::test]
async fn test_coaching_memory_round_trip() {
    let temp = TempDir::new().unwrap();
    let ctx = test_ctx(&temp);
    let executor = ToolExecutor::standard();

    // Profile
    let result = executor
        .execute(
            "update_athlete_profile",
            json!({"updates_json": json!({
                "name": "Jo",
                "training_preferences": {"long_run_day": "Sunday"}
            }).to_string()}),
            &ctx,
        )
        .await;
    let data = parse_data(&result);
    assert_eq!(data["profile"]["name"], "Jo");

    // Notes
    let result = executor
        .execute(
            "save_coaching_note",
            json!({
                "note_type": "insight",
                "content_json": json!({"summary": "Fades late in long runs"}).to_string()
            }),
            &ctx,
        )
        .await;
    let data = parse_data(&result);
    assert_eq!(data["note"]["note_type"], "insight");

    // Active plan feeds the context
    executor
        .execute("save_training_plan", json!({"plan_json": sample_plan_json()}), &ctx)
        .await;

    let result = executor.execute("get_coaching_context", json!({}), &ctx).await;
    let data = parse_data(&result);
    assert_eq!(data["athlete_profile"]["name"], "Jo");
    assert_eq!(data["recent_notes"].as_array().unwrap().len(), 1);
    assert_eq!(data["active_plan"]["plan_name"], "Half Build");
    assert!(data["coaching_persona"].is_null(), "no persona saved yet");
}

#[tokio::test]
async fn test_save_note_rejects_unknown_type() {
    let temp = TempDir::new().unwrap();
    let ctx = test_ctx(&temp);
    let executor = ToolExecutor::standard();

    let result = executor
        .execute(
            "save_coaching_note",
            json!({"note_type": "diary", "content_json": "{}"}),
            &ctx,
        )
        .await;
    assert!(result.is_error);
    assert!(result.content.contains("Invalid note type"));
}

// =============================================================================
// Activity tools (offline behavior)
// =============================================================================

#[tokio::test]
async fn test_activity_tools_fail_soft_without_client() {
    let temp = TempDir::new().unwrap();
    let ctx = test_ctx(&temp);
    let executor = ToolExecutor::standard();

    for (name, input) in [
        ("get_activities", json!({})),
        ("get_activities_by_date_range", json!({"start_date": "2026-07-01", "end_date": "2026-07-14"})),
        ("get_activity_by_id", json!({"activity_id": 1})),
        ("get_recent_activities", json!({})),
        ("get_activity_streams", json!({"activity_id": 1})),
    ] {
        let result = executor.execute(name, input, &ctx).await;
        assert!(result.is_error, "{} should fail without a client", name);
        assert!(result.content.contains("not initialized"), "{}: {}", name, result.content);
    }
}
