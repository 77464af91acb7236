//! Training plan storage
//!
//! Plans are stored whole under `training_plans/`, one file per plan. Updates
//! merge into the raw document and must re-validate against the plan schema
//! before anything is written back, so a bad update can never leave an
//! unreadable plan on disk.

use std::path::Path;

use eyre::{Result, eyre};
use runstore::{DocStore, merge_json, now_iso};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{PlanSummary, TrainingPlan};

const SUBDIR: &str = "training_plans";
const PREFIX: &str = "plan_";

/// Storage for training plans
pub struct PlanStore {
    docs: DocStore,
}

impl PlanStore {
    /// Open plan storage under the data directory
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let docs = DocStore::open(data_dir.as_ref().join(SUBDIR))?;
        Ok(Self { docs })
    }

    fn file_name(plan_id: &str) -> String {
        format!("{}{}.json", PREFIX, plan_id)
    }

    /// Generate a short unique plan id
    ///
    /// Random v4, not v7: the first chars of a v7 are a timestamp prefix that
    /// repeats across plans saved close together.
    fn generate_plan_id() -> String {
        uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
    }

    /// Save a training plan, stamping id and metadata
    ///
    /// Returns the plan id (generated when neither the plan nor the caller
    /// carries one).
    pub fn save(&self, mut plan: TrainingPlan, plan_id: Option<String>) -> Result<String> {
        let plan_id = plan_id
            .or_else(|| plan.id.clone())
            .unwrap_or_else(Self::generate_plan_id);

        plan.id = Some(plan_id.clone());
        if plan.created_at.is_none() {
            plan.created_at = Some(now_iso());
        }
        plan.updated_at = Some(now_iso());

        self.docs.save_json(&Self::file_name(&plan_id), &plan)?;
        debug!(plan_id, plan_name = %plan.plan_name, "Saved plan");
        Ok(plan_id)
    }

    /// Get a training plan by id
    pub fn get(&self, plan_id: &str) -> Result<Option<TrainingPlan>> {
        self.docs.load_json(&Self::file_name(plan_id))
    }

    /// List all plans as summaries, sorted by race date (upcoming first)
    ///
    /// A plan file that no longer parses is skipped, not fatal.
    pub fn list(&self) -> Result<Vec<PlanSummary>> {
        let mut summaries = Vec::new();
        for name in self.docs.list(PREFIX)? {
            let fallback_id = name.trim_start_matches(PREFIX).trim_end_matches(".json");
            match self.docs.load_json::<TrainingPlan>(&name) {
                Ok(Some(plan)) => summaries.push(plan.summary(fallback_id)),
                Ok(None) => {}
                Err(e) => warn!(name, error = %e, "Skipping unreadable plan"),
            }
        }
        summaries.sort_by_key(|s| s.race_date);
        Ok(summaries)
    }

    /// Update an existing plan by merging updates into the stored document
    ///
    /// Returns None if the plan doesn't exist. Fails without writing when the
    /// merged document no longer parses as a plan.
    pub fn update(&self, plan_id: &str, updates: Value) -> Result<Option<TrainingPlan>> {
        let Some(mut doc) = self.docs.load_json::<Value>(&Self::file_name(plan_id))? else {
            return Ok(None);
        };

        merge_json(&mut doc, updates);

        let mut plan: TrainingPlan = serde_json::from_value(doc)
            .map_err(|e| eyre!("Update would produce an invalid plan: {}", e))?;
        plan.id = Some(plan_id.to_string());
        plan.updated_at = Some(now_iso());

        self.docs.save_json(&Self::file_name(plan_id), &plan)?;
        debug!(plan_id, "Updated plan");
        Ok(Some(plan))
    }

    /// Delete a plan. Returns true if it existed.
    pub fn delete(&self, plan_id: &str) -> Result<bool> {
        self.docs.delete(&Self::file_name(plan_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_plan(name: &str, race_date: &str) -> TrainingPlan {
        serde_json::from_value(json!({
            "plan_name": name,
            "goal_race": {
                "date": race_date,
                "race_type": "half_marathon",
                "distance_km": 21.1,
                "goal_time": "1:39:00",
                "goal_pace_min_per_km": "4:42",
                "race_name": "City Half"
            },
            "plan_start_date": "2026-01-05",
            "plan_end_date": race_date,
            "weeks": []
        }))
        .unwrap()
    }

    #[test]
    fn test_save_generates_id_and_metadata() {
        let temp = TempDir::new().unwrap();
        let store = PlanStore::open(temp.path()).unwrap();

        let id = store.save(sample_plan("Half Build", "2026-03-15"), None).unwrap();
        assert_eq!(id.len(), 8);

        let plan = store.get(&id).unwrap().unwrap();
        assert_eq!(plan.id.as_deref(), Some(id.as_str()));
        assert!(plan.created_at.is_some());
        assert!(plan.updated_at.is_some());
    }

    #[test]
    fn test_save_with_explicit_id() {
        let temp = TempDir::new().unwrap();
        let store = PlanStore::open(temp.path()).unwrap();

        let id = store
            .save(sample_plan("Half Build", "2026-03-15"), Some("abc12345".to_string()))
            .unwrap();
        assert_eq!(id, "abc12345");
        assert!(store.get("abc12345").unwrap().is_some());
    }

    #[test]
    fn test_list_sorted_by_race_date() {
        let temp = TempDir::new().unwrap();
        let store = PlanStore::open(temp.path()).unwrap();

        store.save(sample_plan("Autumn", "2026-10-04"), None).unwrap();
        store.save(sample_plan("Spring", "2026-03-15"), None).unwrap();

        let summaries = store.list().unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].plan_name, "Spring");
        assert_eq!(summaries[1].plan_name, "Autumn");
    }

    #[test]
    fn test_update_merges_nested_fields() {
        let temp = TempDir::new().unwrap();
        let store = PlanStore::open(temp.path()).unwrap();

        let id = store.save(sample_plan("Half Build", "2026-03-15"), None).unwrap();
        let updated = store
            .update(&id, json!({"goal_race": {"goal_time": "1:37:30"}, "is_active": false}))
            .unwrap()
            .unwrap();

        assert_eq!(updated.goal_race.goal_time, "1:37:30");
        assert_eq!(updated.goal_race.race_name, "City Half");
        assert!(!updated.is_active);
    }

    #[test]
    fn test_update_missing_plan() {
        let temp = TempDir::new().unwrap();
        let store = PlanStore::open(temp.path()).unwrap();
        assert!(store.update("nope1234", json!({})).unwrap().is_none());
    }

    #[test]
    fn test_invalid_update_rejected_and_plan_untouched() {
        let temp = TempDir::new().unwrap();
        let store = PlanStore::open(temp.path()).unwrap();

        let id = store.save(sample_plan("Half Build", "2026-03-15"), None).unwrap();
        let result = store.update(&id, json!({"goal_race": {"date": "not-a-date"}}));
        assert!(result.is_err());

        let plan = store.get(&id).unwrap().unwrap();
        assert_eq!(plan.goal_race.goal_time, "1:39:00");
    }

    #[test]
    fn test_delete() {
        let temp = TempDir::new().unwrap();
        let store = PlanStore::open(temp.path()).unwrap();

        let id = store.save(sample_plan("Half Build", "2026-03-15"), None).unwrap();
        assert!(store.delete(&id).unwrap());
        assert!(store.get(&id).unwrap().is_none());
        assert!(!store.delete(&id).unwrap());
    }
}
