//! Training report statistics
//!
//! Aggregates mirrored runs into the report the agent consumes: an overall
//! summary, per-ISO-week summaries, and individual runs with lap splits.

use serde::Serialize;

use crate::dates::{group_runs_by_week, week_date_range};
use crate::format::{format_duration, format_pace};
use crate::strava::StoredRun;

/// Summary statistics over a set of runs
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    pub total_runs: usize,
    pub total_distance_km: f64,
    pub total_time: String,
    pub total_elevation_m: i64,
    pub avg_pace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_hr: Option<u32>,
}

/// One lap split in an individual run
#[derive(Debug, Clone, Serialize)]
pub struct LapSplit {
    pub km: usize,
    pub distance_km: f64,
    pub pace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hr: Option<u32>,
}

/// An individual run in the report
#[derive(Debug, Clone, Serialize)]
pub struct RunDetail {
    pub id: i64,
    pub name: String,
    pub date: String,
    pub distance_km: f64,
    pub time: String,
    pub pace: String,
    pub elevation_m: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_hr: Option<u32>,
    pub laps: Vec<LapSplit>,
}

/// Per-week summary in the report
#[derive(Debug, Clone, Serialize)]
pub struct WeeklySummary {
    pub year: i32,
    pub week: u32,
    pub date_range: String,
    pub runs: usize,
    pub distance_km: f64,
    pub time: String,
    pub elevation_m: i64,
    pub avg_pace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_hr: Option<u32>,
}

/// The full training report
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub overall_summary: SummaryStats,
    pub weekly_summaries: Vec<WeeklySummary>,
    pub individual_runs: Vec<RunDetail>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Calculate summary statistics for a set of runs
pub fn summary_stats(runs: &[&StoredRun]) -> SummaryStats {
    if runs.is_empty() {
        return SummaryStats {
            total_runs: 0,
            total_distance_km: 0.0,
            total_time: "0:00".to_string(),
            total_elevation_m: 0,
            avg_pace: "N/A".to_string(),
            avg_hr: None,
        };
    }

    let total_distance: f64 = runs.iter().map(|r| r.activity.distance_metres).sum();
    let total_time: u64 = runs.iter().map(|r| r.activity.moving_time_seconds).sum();
    let total_elevation: f64 = runs.iter().map(|r| r.activity.total_elevation_gain_metres).sum();

    let avg_pace = if total_distance > 0.0 && total_time > 0 {
        format_pace(total_distance / total_time as f64)
    } else {
        "N/A".to_string()
    };

    // Average HR comes from lap data; not every run carries it
    let hr_values: Vec<f64> = runs
        .iter()
        .flat_map(|r| r.laps.iter())
        .filter_map(|lap| lap.average_heartrate)
        .filter(|hr| *hr > 0.0)
        .collect();
    let avg_hr = if hr_values.is_empty() {
        None
    } else {
        Some((hr_values.iter().sum::<f64>() / hr_values.len() as f64).round() as u32)
    };

    SummaryStats {
        total_runs: runs.len(),
        total_distance_km: round2(total_distance / 1000.0),
        total_time: format_duration(total_time),
        total_elevation_m: total_elevation.round() as i64,
        avg_pace,
        avg_hr,
    }
}

/// Build the individual-run entry for the report
pub fn run_detail(run: &StoredRun) -> RunDetail {
    let activity = &run.activity;

    let laps = run
        .laps
        .iter()
        .enumerate()
        .map(|(i, lap)| LapSplit {
            km: i + 1,
            distance_km: round2(lap.distance / 1000.0),
            pace: format_pace(lap.average_speed),
            hr: lap
                .average_heartrate
                .filter(|hr| *hr > 0.0)
                .map(|hr| hr.round() as u32),
        })
        .collect();

    RunDetail {
        id: activity.id,
        name: activity.name.clone(),
        date: activity.start_date_naive().to_string(),
        distance_km: round2(activity.distance_metres / 1000.0),
        time: format_duration(activity.moving_time_seconds),
        pace: format_pace(activity.average_speed_mps),
        elevation_m: activity.total_elevation_gain_metres.round() as i64,
        avg_hr: run.average_heartrate().map(|hr| hr.round() as u32),
        laps,
    }
}

/// Assemble the full training report
pub fn build_report(runs: &[StoredRun]) -> TrainingReport {
    let all: Vec<&StoredRun> = runs.iter().collect();
    let overall_summary = summary_stats(&all);

    // Weekly summaries, most recent week first
    let weekly_summaries = group_runs_by_week(runs)
        .into_iter()
        .rev()
        .map(|((year, week), week_runs)| {
            let stats = summary_stats(&week_runs);
            WeeklySummary {
                year,
                week,
                date_range: week_date_range(year, week),
                runs: stats.total_runs,
                distance_km: stats.total_distance_km,
                time: stats.total_time,
                elevation_m: stats.total_elevation_m,
                avg_pace: stats.avg_pace,
                avg_hr: stats.avg_hr,
            }
        })
        .collect();

    let individual_runs = runs.iter().map(run_detail).collect();

    TrainingReport {
        overall_summary,
        weekly_summaries,
        individual_runs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(id: i64, start: &str, distance_m: f64, time_s: u64, hr: Option<f64>) -> StoredRun {
        let speed = if time_s > 0 { distance_m / time_s as f64 } else { 0.0 };
        let mut value = json!({
            "id": id,
            "name": "Run",
            "sport_type": "Run",
            "start_date": start,
            "distance": distance_m,
            "moving_time": time_s,
            "average_speed": speed,
            "total_elevation_gain": 50.0
        });
        if let Some(hr) = hr {
            value["laps"] = json!([{"distance": distance_m, "average_speed": 3.0, "average_heartrate": hr}]);
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_summary_stats_empty() {
        let stats = summary_stats(&[]);
        assert_eq!(stats.total_runs, 0);
        assert_eq!(stats.avg_pace, "N/A");
        assert_eq!(stats.total_time, "0:00");
        assert!(stats.avg_hr.is_none());
    }

    #[test]
    fn test_summary_stats_totals() {
        let a = run(1, "2026-07-20T06:00:00Z", 10_000.0, 4000, Some(150.0));
        let b = run(2, "2026-07-22T06:00:00Z", 5_000.0, 2000, Some(160.0));
        let stats = summary_stats(&[&a, &b]);

        assert_eq!(stats.total_runs, 2);
        assert_eq!(stats.total_distance_km, 15.0);
        assert_eq!(stats.total_time, "1:40:00");
        assert_eq!(stats.total_elevation_m, 100);
        // 15000m in 6000s = 2.5 m/s = 6:40/km
        assert_eq!(stats.avg_pace, "6:40");
        assert_eq!(stats.avg_hr, Some(155));
    }

    #[test]
    fn test_summary_stats_no_hr_data() {
        let a = run(1, "2026-07-20T06:00:00Z", 10_000.0, 3000, None);
        let stats = summary_stats(&[&a]);
        assert!(stats.avg_hr.is_none());
    }

    #[test]
    fn test_run_detail_lap_splits() {
        let run: StoredRun = serde_json::from_value(json!({
            "id": 7,
            "name": "Intervals",
            "sport_type": "Run",
            "start_date": "2026-07-21T06:00:00Z",
            "distance": 8000.0,
            "moving_time": 2400,
            "average_speed": 8000.0 / 2400.0,
            "laps": [
                {"distance": 1000.0, "average_speed": 2.5, "average_heartrate": 162.0},
                {"distance": 1000.0, "average_speed": 2.5}
            ]
        }))
        .unwrap();

        let detail = run_detail(&run);
        assert_eq!(detail.date, "2026-07-21");
        assert_eq!(detail.laps.len(), 2);
        assert_eq!(detail.laps[0].km, 1);
        assert_eq!(detail.laps[0].pace, "6:40");
        assert_eq!(detail.laps[0].hr, Some(162));
        assert!(detail.laps[1].hr.is_none());
    }

    #[test]
    fn test_build_report_weeks_most_recent_first() {
        let runs = vec![
            run(1, "2026-07-20T06:00:00Z", 10_000.0, 3000, None),
            run(2, "2026-07-27T06:00:00Z", 12_000.0, 3600, None),
        ];

        let report = build_report(&runs);
        assert_eq!(report.overall_summary.total_runs, 2);
        assert_eq!(report.weekly_summaries.len(), 2);
        assert_eq!(report.weekly_summaries[0].week, 31);
        assert_eq!(report.weekly_summaries[1].week, 30);
        assert_eq!(report.individual_runs.len(), 2);
    }
}
