//! Domain record types for runcoach
//!
//! Training plan and coaching records. Mirrored activity records live in
//! [`crate::strava::types`] since their shape is dictated by the wire format.

mod coaching;
mod plan;

pub use coaching::{AthleteProfile, NoteType, PlanAdjustment, SessionNote};
pub use plan::{GoalRace, PlanSummary, PlannedRun, TrainingPlan, TrainingWeek, WorkoutType};
