//! Runcoach - Strava mirror and training-plan coach
//!
//! Runcoach mirrors a runner's Strava history into local JSON storage, keeps
//! user-authored training plans, and compares planned workouts against what
//! actually got run. Coaching notes and an athlete profile persist alongside
//! so a conversational agent can pick up where the last session left off.
//!
//! # Modules
//!
//! - [`strava`] - Thin client adapter for the Strava API
//! - [`domain`] - Training plan and coaching record types
//! - [`store`] - Typed stores over the runstore substrate
//! - [`report`] - Mirror sync, training statistics, adherence analysis
//! - [`tools`] - Tool registry exposed to the coaching agent
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod dates;
pub mod domain;
pub mod format;
pub mod report;
pub mod store;
pub mod strava;
pub mod tools;

// Re-export commonly used types
pub use config::{CoachingConfig, Config, StorageConfig, StravaConfig, SyncConfig};
pub use domain::{
    AthleteProfile, GoalRace, NoteType, PlanAdjustment, PlanSummary, PlannedRun, SessionNote, TrainingPlan,
    TrainingWeek, WorkoutType,
};
pub use report::{AdherenceReport, SummaryStats, TrainingReport, WeeklySummary};
pub use store::{CoachingStore, PlanStore, RunStore};
pub use strava::{Activity, Lap, StoredRun, StravaClient, StravaError};
pub use tools::{Tool, ToolContext, ToolDefinition, ToolError, ToolExecutor, ToolResult};
