//! Strava API client and wire types
//!
//! A thin adapter over the activities API: token refresh, bounded retry, and
//! decoding into the trimmed [`Activity`] shape the rest of the tool uses.

mod client;
mod error;
pub mod types;

pub use client::StravaClient;
pub use error::StravaError;
pub use types::{Activity, Lap, StoredRun};
