//! Local mirror of Strava runs
//!
//! One JSON file per activity under `run_data/`, named by activity id so the
//! sync can cheaply skip what it already has.

use std::collections::HashSet;
use std::path::Path;

use eyre::Result;
use runstore::DocStore;
use tracing::debug;

use crate::strava::StoredRun;

const SUBDIR: &str = "run_data";
const PREFIX: &str = "run_";

/// Storage for run data fetched from Strava
pub struct RunStore {
    docs: DocStore,
}

impl RunStore {
    /// Open run storage under the data directory
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let docs = DocStore::open(data_dir.as_ref().join(SUBDIR))?;
        Ok(Self { docs })
    }

    fn file_name(activity_id: i64) -> String {
        format!("{}{}.json", PREFIX, activity_id)
    }

    /// Activity ids already mirrored locally
    pub fn existing_ids(&self) -> Result<HashSet<i64>> {
        let mut ids = HashSet::new();
        for name in self.docs.list(PREFIX)? {
            let stem = name.trim_start_matches(PREFIX).trim_end_matches(".json");
            if let Ok(id) = stem.parse::<i64>() {
                ids.insert(id);
            }
        }
        Ok(ids)
    }

    /// Save a single run
    pub fn save(&self, run: &StoredRun) -> Result<()> {
        debug!(activity_id = run.activity.id, "Saving run");
        self.docs.save_json(&Self::file_name(run.activity.id), run)
    }

    /// Load a single run by activity id
    pub fn load(&self, activity_id: i64) -> Result<Option<StoredRun>> {
        self.docs.load_json(&Self::file_name(activity_id))
    }

    /// Load all mirrored runs, most recent first
    pub fn load_all(&self) -> Result<Vec<StoredRun>> {
        let mut runs: Vec<StoredRun> = self.docs.load_all_json(PREFIX)?;
        runs.sort_by(|a, b| b.activity.start_date.cmp(&a.activity.start_date));
        Ok(runs)
    }

    /// Delete a run by activity id. Returns true if it existed.
    pub fn delete(&self, activity_id: i64) -> Result<bool> {
        self.docs.delete(&Self::file_name(activity_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_run(id: i64, start: &str) -> StoredRun {
        serde_json::from_value(json!({
            "id": id,
            "name": "Morning Run",
            "sport_type": "Run",
            "start_date": start,
            "distance": 10000.0,
            "moving_time": 3000
        }))
        .unwrap()
    }

    #[test]
    fn test_save_load_delete() {
        let temp = TempDir::new().unwrap();
        let store = RunStore::open(temp.path()).unwrap();

        store.save(&sample_run(42, "2026-07-20T06:00:00Z")).unwrap();
        let loaded = store.load(42).unwrap().unwrap();
        assert_eq!(loaded.activity.distance_metres, 10000.0);

        assert!(store.delete(42).unwrap());
        assert!(store.load(42).unwrap().is_none());
        assert!(!store.delete(42).unwrap());
    }

    #[test]
    fn test_existing_ids() {
        let temp = TempDir::new().unwrap();
        let store = RunStore::open(temp.path()).unwrap();

        store.save(&sample_run(1, "2026-07-20T06:00:00Z")).unwrap();
        store.save(&sample_run(2, "2026-07-21T06:00:00Z")).unwrap();

        let ids = store.existing_ids().unwrap();
        assert_eq!(ids, HashSet::from([1, 2]));
    }

    #[test]
    fn test_load_all_most_recent_first() {
        let temp = TempDir::new().unwrap();
        let store = RunStore::open(temp.path()).unwrap();

        store.save(&sample_run(1, "2026-07-18T06:00:00Z")).unwrap();
        store.save(&sample_run(2, "2026-07-21T06:00:00Z")).unwrap();
        store.save(&sample_run(3, "2026-07-19T06:00:00Z")).unwrap();

        let runs = store.load_all().unwrap();
        let ids: Vec<i64> = runs.iter().map(|r| r.activity.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
