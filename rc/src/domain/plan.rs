//! Training plan record types
//!
//! A plan is authored by the user (via the conversational agent) as JSON and
//! persisted whole. The `weeks` structure carries one `PlannedRun` per
//! scheduled workout; adherence analysis matches those against mirrored runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of workout in a training plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Easy aerobic run
    Easy,
    /// Quality session (intervals, tempo, hills)
    Workout,
    /// Weekly long run
    LongRun,
    /// Race used as a workout
    TuneupRace,
    /// Strength session
    Gym,
    /// Non-running aerobic work
    CrossTraining,
    /// Rest day
    Rest,
}

impl WorkoutType {
    /// Whether this workout produces a run that can be matched against
    /// mirrored activities
    pub fn is_running(&self) -> bool {
        !matches!(self, Self::Gym | Self::CrossTraining | Self::Rest)
    }
}

impl std::fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Workout => write!(f, "workout"),
            Self::LongRun => write!(f, "long_run"),
            Self::TuneupRace => write!(f, "tuneup_race"),
            Self::Gym => write!(f, "gym"),
            Self::CrossTraining => write!(f, "cross_training"),
            Self::Rest => write!(f, "rest"),
        }
    }
}

/// Goal race information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalRace {
    pub date: NaiveDate,

    /// marathon, half_marathon, 10k, 5k
    pub race_type: String,

    pub distance_km: f64,

    /// HH:MM:SS format
    pub goal_time: String,

    /// M:SS format
    pub goal_pace_min_per_km: String,

    pub race_name: String,
}

/// A planned run or workout in the training plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedRun {
    pub day_of_week: String,

    pub date: NaiveDate,

    #[serde(rename = "type")]
    pub workout_type: WorkoutType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // For running workouts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_pace_min_per_km: Option<String>,

    /// Interval structure, e.g. "6 x 800m @ 5k pace"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<String>,

    // For non-running activities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,

    // For tuneup races
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race_name: Option<String>,
}

/// A week in the training plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingWeek {
    pub week_number: u32,

    pub week_start_date: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_planned_distance_km: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_focus: Option<String>,

    #[serde(default)]
    pub runs: Vec<PlannedRun>,
}

/// Complete training plan record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub plan_name: String,

    pub goal_race: GoalRace,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<NaiveDate>,

    pub plan_start_date: NaiveDate,

    pub plan_end_date: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default)]
    pub weeks: Vec<TrainingWeek>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    // Metadata, stamped by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Summary of a stored plan, for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    pub id: String,
    pub plan_name: String,
    pub race_date: NaiveDate,
    pub race_name: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl TrainingPlan {
    /// Build the listing summary for this plan
    ///
    /// `fallback_id` covers records written before ids were stamped into the
    /// document itself.
    pub fn summary(&self, fallback_id: &str) -> PlanSummary {
        PlanSummary {
            id: self.id.clone().unwrap_or_else(|| fallback_id.to_string()),
            plan_name: self.plan_name.clone(),
            race_date: self.goal_race.date,
            race_name: self.goal_race.race_name.clone(),
            is_active: self.is_active,
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }
}
