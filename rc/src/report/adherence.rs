//! Plan adherence analysis
//!
//! Matches planned workouts against mirrored runs by date proximity. A past
//! running workout counts as completed when an actual run landed within one
//! day of its planned date; gym/cross-training/rest entries are excluded from
//! matching since the mirror only holds runs.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{PlannedRun, TrainingPlan};
use crate::format::format_pace;
use crate::strava::StoredRun;

/// How many days a planned workout counts as "upcoming"
const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Matching tolerance between planned and actual dates
const MATCH_TOLERANCE_DAYS: i64 = 1;

/// The actual run matched to a planned workout
#[derive(Debug, Clone, Serialize)]
pub struct ActualRun {
    pub name: String,
    pub distance_km: f64,
    pub pace: String,
}

/// A planned workout with a matching actual run
#[derive(Debug, Clone, Serialize)]
pub struct CompletedWorkout {
    pub date: NaiveDate,
    pub week: u32,
    pub planned: PlannedRun,
    pub actual: ActualRun,
}

/// A past planned workout with no matching run
#[derive(Debug, Clone, Serialize)]
pub struct MissedWorkout {
    pub date: NaiveDate,
    pub week: u32,
    pub planned: PlannedRun,
}

/// A planned workout due within the upcoming window
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingWorkout {
    pub date: NaiveDate,
    pub days_away: i64,
    pub week: u32,
    pub planned: PlannedRun,
}

/// Result of comparing a plan against the mirrored runs
#[derive(Debug, Clone, Serialize)]
pub struct AdherenceReport {
    pub plan_id: String,
    pub plan_name: String,
    /// Percent of due running workouts completed, one decimal
    pub completion_rate: f64,
    pub workouts_completed: usize,
    pub workouts_missed: usize,
    /// Last 5 completed workouts
    pub completed_workouts: Vec<CompletedWorkout>,
    /// Last 10 missed workouts
    pub missed_workouts: Vec<MissedWorkout>,
    pub upcoming_workouts: Vec<UpcomingWorkout>,
}

/// Analyze how well actual training matches the plan
pub fn analyze(plan: &TrainingPlan, runs: &[StoredRun], today: NaiveDate) -> AdherenceReport {
    let mut completed: Vec<CompletedWorkout> = Vec::new();
    let mut missed: Vec<MissedWorkout> = Vec::new();
    let mut upcoming: Vec<UpcomingWorkout> = Vec::new();

    for week in &plan.weeks {
        for planned in &week.runs {
            let date = planned.date;

            if date > today {
                let days_away = (date - today).num_days();
                if days_away <= UPCOMING_WINDOW_DAYS {
                    upcoming.push(UpcomingWorkout {
                        date,
                        days_away,
                        week: week.week_number,
                        planned: planned.clone(),
                    });
                }
                continue;
            }

            // Past workouts: only running entries can match the mirror
            if !planned.workout_type.is_running() {
                continue;
            }

            match find_matching_run(date, runs) {
                Some(run) => completed.push(CompletedWorkout {
                    date,
                    week: week.week_number,
                    planned: planned.clone(),
                    actual: ActualRun {
                        name: run.activity.name.clone(),
                        distance_km: (run.activity.distance_metres / 10.0).round() / 100.0,
                        pace: actual_pace(run),
                    },
                }),
                None => missed.push(MissedWorkout {
                    date,
                    week: week.week_number,
                    planned: planned.clone(),
                }),
            }
        }
    }

    upcoming.sort_by_key(|w| w.days_away);

    let workouts_completed = completed.len();
    let workouts_missed = missed.len();
    let total_due = workouts_completed + workouts_missed;
    let completion_rate = if total_due > 0 {
        (workouts_completed as f64 / total_due as f64 * 1000.0).round() / 10.0
    } else {
        0.0
    };

    // Report carries full counts but only the most recent entries
    if completed.len() > 5 {
        completed.drain(..completed.len() - 5);
    }
    if missed.len() > 10 {
        missed.drain(..missed.len() - 10);
    }

    AdherenceReport {
        plan_id: plan.id.clone().unwrap_or_default(),
        plan_name: plan.plan_name.clone(),
        completion_rate,
        workouts_completed,
        workouts_missed,
        completed_workouts: completed,
        missed_workouts: missed,
        upcoming_workouts: upcoming,
    }
}

/// Find a mirrored run within the matching tolerance of a planned date
fn find_matching_run(planned_date: NaiveDate, runs: &[StoredRun]) -> Option<&StoredRun> {
    runs.iter().find(|run| {
        let run_date = run.activity.start_date_naive();
        (run_date - planned_date).num_days().abs() <= MATCH_TOLERANCE_DAYS
    })
}

fn actual_pace(run: &StoredRun) -> String {
    let distance = run.activity.distance_metres;
    let time = run.activity.moving_time_seconds;
    if distance > 0.0 && time > 0 {
        format_pace(distance / time as f64)
    } else {
        "N/A".to_string()
    }
}
