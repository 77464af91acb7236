//! Runcoach - Strava mirror and training-plan coach
//!
//! CLI entry point for mirror maintenance and plan analysis.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use runcoach::cli::{Cli, Command, OutputFormat};
use runcoach::config::Config;
use runcoach::report::adherence::AdherenceReport;
use runcoach::report::{build_report, fetch_and_save_new_runs, stats::TrainingReport};
use runcoach::store::{PlanStore, RunStore};
use runcoach::strava::StravaClient;
use runcoach::tools::ToolExecutor;
use runcoach::{TrainingPlan, report};

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!("runcoach starting");

    match cli.command {
        Command::Update { weeks } => {
            config.validate()?;
            let client = StravaClient::from_config(&config.strava)?;
            let store = RunStore::open(&config.storage.data_dir)?;

            let lookback = weeks.unwrap_or(config.sync.lookback_weeks);
            let new_runs = fetch_and_save_new_runs(&client, &store, lookback, config.sync.fetch_limit).await?;

            if new_runs == 0 {
                println!("{} Mirror already up to date", "✓".green());
            } else {
                println!("{} Mirrored {} new run(s)", "✓".green(), new_runs.to_string().cyan());
            }
        }
        Command::Report { format } => {
            let store = RunStore::open(&config.storage.data_dir)?;
            let runs = store.load_all()?;
            let report = build_report(&runs);

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => print_report(&report),
            }
        }
        Command::Analyze { plan_id } => {
            let plans = PlanStore::open(&config.storage.data_dir)?;
            let Some(plan) = plans.get(&plan_id)? else {
                eyre::bail!("Plan not found: {}", plan_id);
            };

            let runs = RunStore::open(&config.storage.data_dir)?.load_all()?;
            let today = chrono::Local::now().date_naive();
            let report = report::adherence::analyze(&plan, &runs, today);

            print_plan_overview(&plan, today);
            print_adherence(&report);
        }
        Command::Plans => {
            let plans = PlanStore::open(&config.storage.data_dir)?;
            let summaries = plans.list()?;
            if summaries.is_empty() {
                println!("No training plans found");
            } else {
                for summary in summaries {
                    let marker = if summary.is_active { "●".green() } else { "○".dimmed() };
                    println!(
                        "{} {}  {}  {} ({})",
                        marker,
                        summary.id.cyan(),
                        summary.race_date,
                        summary.plan_name,
                        summary.race_name.dimmed(),
                    );
                }
            }
        }
        Command::Tools => {
            let executor = ToolExecutor::standard();
            for def in executor.definitions() {
                println!("{}  {}", def.name.cyan(), def.description.dimmed());
            }
        }
    }

    Ok(())
}

fn print_report(report: &TrainingReport) {
    let overall = &report.overall_summary;
    println!("{}", "TRAINING REPORT".bold());
    println!("  Runs:           {}", overall.total_runs);
    println!("  Distance:       {:.2} km", overall.total_distance_km);
    println!("  Time:           {}", overall.total_time);
    println!("  Elevation gain: {} m", overall.total_elevation_m);
    println!("  Average pace:   {} /km", overall.avg_pace);
    if let Some(hr) = overall.avg_hr {
        println!("  Average HR:     {} bpm", hr);
    }
    println!();

    if !report.weekly_summaries.is_empty() {
        println!("{}", "WEEKLY".bold());
        for week in &report.weekly_summaries {
            println!(
                "  {}  {} runs  {:.2} km  {}  {} /km",
                week.date_range.cyan(),
                week.runs,
                week.distance_km,
                week.time,
                week.avg_pace,
            );
        }
        println!();
    }

    if !report.individual_runs.is_empty() {
        println!("{}", "RUNS".bold());
        for run in &report.individual_runs {
            let hr = run.avg_hr.map(|hr| format!("  {} bpm", hr)).unwrap_or_default();
            println!(
                "  {}  {:.2} km  {}  {} /km{}  {}",
                run.date.cyan(),
                run.distance_km,
                run.time,
                run.pace,
                hr,
                run.name.dimmed(),
            );
        }
    }
}

fn print_plan_overview(plan: &TrainingPlan, today: chrono::NaiveDate) {
    let race = &plan.goal_race;
    println!("{}", "TRAINING PLAN OVERVIEW".bold());
    println!("  Plan:      {}", plan.plan_name);
    println!("  Goal race: {} ({})", race.race_name, race.race_type);
    println!("  Race date: {}", race.date);
    println!("  Goal time: {} ({} /km)", race.goal_time, race.goal_pace_min_per_km);
    println!("  Duration:  {} to {}", plan.plan_start_date, plan.plan_end_date);

    let days_until = (race.date - today).num_days();
    if days_until > 0 {
        println!("  Days until race: {} ({:.1} weeks)", days_until, days_until as f64 / 7.0);
    } else if days_until == 0 {
        println!("  {}", "Race day is TODAY!".bold());
    } else {
        println!("  Race was {} days ago", -days_until);
    }
    println!();
}

fn print_adherence(report: &AdherenceReport) {
    println!("{}", "PLAN ADHERENCE".bold());
    println!(
        "  Completion: {}% ({} completed, {} missed)",
        report.completion_rate.to_string().cyan(),
        report.workouts_completed,
        report.workouts_missed,
    );
    println!();

    if !report.completed_workouts.is_empty() {
        println!("{}", "RECENTLY COMPLETED".bold());
        for workout in &report.completed_workouts {
            println!(
                "  {} {}  {} planned → {:.2} km @ {} /km",
                "✓".green(),
                workout.date,
                workout.planned.workout_type,
                workout.actual.distance_km,
                workout.actual.pace,
            );
        }
        println!();
    }

    if !report.missed_workouts.is_empty() {
        println!("{}", "MISSED".bold());
        for workout in &report.missed_workouts {
            println!("  {} {}  {}", "✗".red(), workout.date, workout.planned.workout_type);
        }
        println!();
    }

    println!("{}", "UPCOMING (next 7 days)".bold());
    if report.upcoming_workouts.is_empty() {
        println!("  No workouts scheduled in the next week.");
        return;
    }
    for workout in &report.upcoming_workouts {
        let label = match workout.days_away {
            0 => "TODAY".to_string(),
            1 => "TOMORROW".to_string(),
            n => format!("in {} days", n),
        };
        let detail = match workout.planned.distance_km {
            Some(km) => format!("{:.1} km", km),
            None => workout
                .planned
                .duration_minutes
                .map(|m| format!("{} min", m))
                .unwrap_or_default(),
        };
        println!(
            "  {}  {} ({})  {} {}",
            workout.date.to_string().cyan(),
            workout.planned.workout_type,
            label,
            detail,
            workout.planned.description.as_deref().unwrap_or("").dimmed(),
        );
    }
}
