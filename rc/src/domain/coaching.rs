//! Coaching record types
//!
//! These records are the coaching agent's memory between conversations: a
//! profile of the athlete, dated session notes, and a log of plan changes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Athlete profile for coaching context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Extensible for multi-athlete support
    #[serde(default = "default_athlete_id")]
    pub athlete_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Freeform preferences (preferred days, paces, surfaces, ...)
    #[serde(default)]
    pub training_preferences: Map<String, Value>,

    #[serde(default)]
    pub goals: Vec<Value>,

    #[serde(default)]
    pub injury_history: Vec<Value>,

    #[serde(default)]
    pub notes: String,

    // Metadata, stamped by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

pub(crate) fn default_athlete_id() -> String {
    "default".to_string()
}

impl AthleteProfile {
    /// Empty profile for an athlete, the base for first-time updates
    pub fn empty(athlete_id: &str) -> Self {
        Self {
            athlete_id: athlete_id.to_string(),
            name: None,
            training_preferences: Map::new(),
            goals: Vec::new(),
            injury_history: Vec::new(),
            notes: String::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// Kind of coaching note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
    /// Summary of a coaching conversation
    SessionSummary,
    /// Observation about the athlete's training
    Insight,
    /// Record of a plan adjustment made
    Adjustment,
}

impl std::fmt::Display for NoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SessionSummary => write!(f, "session_summary"),
            Self::Insight => write!(f, "insight"),
            Self::Adjustment => write!(f, "adjustment"),
        }
    }
}

impl std::str::FromStr for NoteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "session_summary" => Ok(Self::SessionSummary),
            "insight" => Ok(Self::Insight),
            "adjustment" => Ok(Self::Adjustment),
            other => Err(format!(
                "Invalid note type '{}'. Must be one of: session_summary, insight, adjustment",
                other
            )),
        }
    }
}

/// A note from a coaching session
///
/// The body is agent-authored and freeform (summary, key_points, whatever the
/// conversation produced), so it flattens into the record as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionNote {
    pub timestamp: String,

    #[serde(default = "default_athlete_id")]
    pub athlete_id: String,

    pub note_type: NoteType,

    #[serde(flatten)]
    pub content: Map<String, Value>,
}

/// Record of a training plan adjustment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanAdjustment {
    pub timestamp: String,

    #[serde(default = "default_athlete_id")]
    pub athlete_id: String,

    pub plan_id: String,

    pub change_description: String,

    pub reason: String,
}
