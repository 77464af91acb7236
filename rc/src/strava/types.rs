//! Strava wire types
//!
//! The API returns far more than this tool uses. `Activity` keeps only the
//! fields the reports and matching need, renamed with explicit units so the
//! mirrored JSON is self-describing. Serde aliases accept the raw wire names
//! on decode while the mirror round-trips under the unit-suffixed names.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single activity, trimmed to the fields this tool uses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub sport_type: String,

    pub start_date: DateTime<Utc>,

    #[serde(alias = "distance", default)]
    pub distance_metres: f64,

    #[serde(alias = "moving_time", default)]
    pub moving_time_seconds: u64,

    #[serde(alias = "elapsed_time", default)]
    pub elapsed_time_seconds: u64,

    #[serde(alias = "average_speed", default)]
    pub average_speed_mps: f64,

    #[serde(alias = "max_speed", default)]
    pub max_speed_mps: f64,

    #[serde(alias = "total_elevation_gain", default)]
    pub total_elevation_gain_metres: f64,

    #[serde(alias = "elev_high", skip_serializing_if = "Option::is_none")]
    pub elev_high_metres: Option<f64>,

    #[serde(alias = "elev_low", skip_serializing_if = "Option::is_none")]
    pub elev_low_metres: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_latlng: Option<Vec<f64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_latlng: Option<Vec<f64>>,
}

impl Activity {
    /// Whether this activity counts as a run (Run, TrailRun, VirtualRun, ...)
    pub fn is_run(&self) -> bool {
        self.sport_type.to_lowercase().contains("run")
    }

    /// Civil date the activity started on
    pub fn start_date_naive(&self) -> NaiveDate {
        self.start_date.date_naive()
    }
}

/// A lap within an activity
///
/// Laps keep the wire field names; unknown fields are preserved so the mirror
/// stores what the API returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lap {
    #[serde(default)]
    pub distance: f64,

    #[serde(default)]
    pub average_speed: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_heartrate: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heartrate: Option<f64>,

    #[serde(default)]
    pub moving_time: u64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A mirrored run: the trimmed activity plus its fetched detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRun {
    #[serde(flatten)]
    pub activity: Activity,

    /// Raw streams response (heartrate, pace, altitude, cadence); None when
    /// the fetch failed or the activity has no streams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streams: Option<Value>,

    #[serde(default)]
    pub laps: Vec<Lap>,
}

impl StoredRun {
    /// Average heart rate across laps that carry one
    pub fn average_heartrate(&self) -> Option<f64> {
        let hr: Vec<f64> = self
            .laps
            .iter()
            .filter_map(|lap| lap.average_heartrate)
            .filter(|hr| *hr > 0.0)
            .collect();
        if hr.is_empty() {
            return None;
        }
        Some(hr.iter().sum::<f64>() / hr.len() as f64)
    }
}

/// Response of the OAuth refresh-token exchange
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_at: i64,
}
