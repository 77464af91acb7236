//! Activity mirror sync
//!
//! Pulls recent activities from Strava, keeps the runs, and stores the ones
//! not yet mirrored along with their streams and laps. Detail fetches fail
//! soft: a run without streams is still worth mirroring.

use chrono::{Duration, Utc};
use eyre::Result;
use tracing::{debug, info, warn};

use crate::store::RunStore;
use crate::strava::{Activity, Lap, StoredRun, StravaClient};

/// Stream types fetched for each mirrored run
pub const STREAM_KEYS: [&str; 4] = ["heartrate", "pace", "altitude", "cadence"];

/// Fetch recent runs from Strava and mirror the new ones locally
///
/// Returns the number of new runs saved.
pub async fn fetch_and_save_new_runs(
    client: &StravaClient,
    store: &RunStore,
    lookback_weeks: u32,
    fetch_limit: u32,
) -> Result<usize> {
    let existing = store.existing_ids()?;

    let after = (Utc::now() - Duration::weeks(lookback_weeks as i64)).timestamp();
    let activities = client.get_activities(fetch_limit, None, Some(after)).await?;
    debug!(fetched = activities.len(), lookback_weeks, "Fetched activities");

    let new_runs: Vec<Activity> = activities
        .into_iter()
        .filter(|a| a.is_run())
        .filter(|a| !existing.contains(&a.id))
        .collect();

    let mut saved = 0;
    for activity in new_runs {
        let activity_id = activity.id;
        let (streams, laps) = fetch_run_details(client, activity_id).await;
        store.save(&StoredRun {
            activity,
            streams,
            laps,
        })?;
        saved += 1;
        debug!(activity_id, "Mirrored run");
    }

    info!(new_runs = saved, "Run data sync complete");
    Ok(saved)
}

/// Fetch streams and laps for a single run
///
/// Either fetch may fail (old activities, missing sensors); the run is
/// mirrored regardless.
async fn fetch_run_details(client: &StravaClient, activity_id: i64) -> (Option<serde_json::Value>, Vec<Lap>) {
    let streams = match client.get_activity_streams(activity_id, &STREAM_KEYS).await {
        Ok(streams) => Some(streams),
        Err(e) => {
            warn!(activity_id, error = %e, "Could not fetch streams");
            None
        }
    };

    let laps = match client.get_activity_laps(activity_id).await {
        Ok(laps) => laps,
        Err(e) => {
            warn!(activity_id, error = %e, "Could not fetch laps");
            Vec::new()
        }
    };

    (streams, laps)
}
