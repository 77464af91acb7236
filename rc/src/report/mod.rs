//! Reports: mirror sync, training statistics, and plan adherence

pub mod adherence;
pub mod stats;
pub mod sync;

pub use adherence::{AdherenceReport, CompletedWorkout, MissedWorkout, UpcomingWorkout};
pub use stats::{RunDetail, SummaryStats, TrainingReport, WeeklySummary, build_report, summary_stats};
pub use sync::fetch_and_save_new_runs;
