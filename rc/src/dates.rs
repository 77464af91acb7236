//! Date helpers: ISO parsing, week keys, timestamp bounds

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday};
use eyre::{Result, eyre};
use std::collections::BTreeMap;

use crate::strava::StoredRun;

/// Year + ISO week number
pub type WeekKey = (i32, u32);

/// Parse a date string in ISO format (YYYY-MM-DD)
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| eyre!("Invalid date format: {}. Expected format: YYYY-MM-DD", date_str))
}

/// Unix timestamp for the start of a date (00:00:00 UTC)
pub fn start_of_day_timestamp(date: NaiveDate) -> i64 {
    let dt = NaiveDateTime::new(date, NaiveTime::MIN);
    Utc.from_utc_datetime(&dt).timestamp()
}

/// Unix timestamp for the end of a date (23:59:59 UTC)
pub fn end_of_day_timestamp(date: NaiveDate) -> i64 {
    let dt = NaiveDateTime::new(date, NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN));
    Utc.from_utc_datetime(&dt).timestamp()
}

/// ISO week key for a date
pub fn week_key(date: NaiveDate) -> WeekKey {
    let iso = date.iso_week();
    (iso.year(), iso.week())
}

/// Date range string for an ISO week, Monday to Sunday
pub fn week_date_range(year: i32, week: u32) -> String {
    let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon);
    let sunday = NaiveDate::from_isoywd_opt(year, week, Weekday::Sun);
    match (monday, sunday) {
        (Some(monday), Some(sunday)) => format!("{} to {}", monday, sunday),
        _ => format!("{}-W{:02}", year, week),
    }
}

/// Group runs by ISO week
///
/// BTreeMap keeps the weeks in calendar order; callers reverse for
/// most-recent-first reporting.
pub fn group_runs_by_week(runs: &[StoredRun]) -> BTreeMap<WeekKey, Vec<&StoredRun>> {
    let mut weeks: BTreeMap<WeekKey, Vec<&StoredRun>> = BTreeMap::new();
    for run in runs {
        weeks.entry(week_key(run.activity.start_date_naive())).or_default().push(run);
    }
    weeks
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2026-04-12").unwrap(), NaiveDate::from_ymd_opt(2026, 4, 12).unwrap());
        assert!(parse_date("12/04/2026").is_err());
        assert!(parse_date("not-a-date").is_err());
    }

    #[test]
    fn test_day_timestamp_bounds() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 20).unwrap();
        let start = start_of_day_timestamp(date);
        let end = end_of_day_timestamp(date);
        assert_eq!(end - start, 86_399);
    }

    #[test]
    fn test_week_key_iso_year_boundary() {
        // 2024-12-30 is a Monday belonging to ISO week 1 of 2025
        let date = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        assert_eq!(week_key(date), (2025, 1));
    }

    #[test]
    fn test_week_date_range() {
        assert_eq!(week_date_range(2026, 30), "2026-07-20 to 2026-07-26");
    }

    #[test]
    fn test_group_runs_by_week() {
        let runs: Vec<StoredRun> = ["2026-07-20T06:00:00Z", "2026-07-22T06:00:00Z", "2026-07-27T06:00:00Z"]
            .iter()
            .enumerate()
            .map(|(i, start)| {
                serde_json::from_value(json!({"id": i as i64, "start_date": start})).unwrap()
            })
            .collect();

        let weeks = group_runs_by_week(&runs);
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[&(2026, 30)].len(), 2);
        assert_eq!(weeks[&(2026, 31)].len(), 1);
    }
}
