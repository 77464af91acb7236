//! Coaching memory storage
//!
//! Persona markdown, per-athlete profile, session notes, and plan
//! adjustments under `coaching_data/`. Notes and adjustments are
//! newest-first lists; notes are pruned to a configured cap on insert.

use std::path::Path;

use eyre::{Result, eyre};
use runstore::{DocStore, now_iso};
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::{AthleteProfile, NoteType, PlanAdjustment, SessionNote};

const SUBDIR: &str = "coaching_data";
const PERSONA_FILE: &str = "coaching_persona.md";

/// Storage for coaching data: persona, athlete profile, and session notes
pub struct CoachingStore {
    docs: DocStore,
    max_notes: usize,
}

impl CoachingStore {
    /// Open coaching storage under the data directory
    pub fn open(data_dir: impl AsRef<Path>, max_notes: usize) -> Result<Self> {
        let docs = DocStore::open(data_dir.as_ref().join(SUBDIR))?;
        Ok(Self { docs, max_notes })
    }

    fn profile_file(athlete_id: &str) -> String {
        format!("athlete_profile_{}.json", athlete_id)
    }

    fn notes_file(athlete_id: &str) -> String {
        format!("session_notes_{}.json", athlete_id)
    }

    fn adjustments_file(athlete_id: &str) -> String {
        format!("plan_adjustments_{}.json", athlete_id)
    }

    /// Get the coaching persona markdown content
    pub fn persona(&self) -> Result<Option<String>> {
        self.docs.load_text(PERSONA_FILE)
    }

    /// Save the coaching persona markdown content
    pub fn save_persona(&self, content: &str) -> Result<()> {
        self.docs.save_text(PERSONA_FILE, content)
    }

    /// Get the athlete profile
    pub fn profile(&self, athlete_id: &str) -> Result<Option<AthleteProfile>> {
        self.docs.load_json(&Self::profile_file(athlete_id))
    }

    /// Save the athlete profile, stamping metadata
    pub fn save_profile(&self, mut profile: AthleteProfile, athlete_id: &str) -> Result<AthleteProfile> {
        profile.athlete_id = athlete_id.to_string();
        if profile.updated_at.is_none() {
            profile.created_at = Some(now_iso());
        }
        profile.updated_at = Some(now_iso());

        self.docs.save_json(&Self::profile_file(athlete_id), &profile)?;
        debug!(athlete_id, "Saved athlete profile");
        Ok(profile)
    }

    /// Merge updates into the athlete profile
    ///
    /// Map fields merge key-wise, list fields extend, everything else
    /// replaces. Creates an empty profile on first update.
    pub fn update_profile(&self, updates: Value, athlete_id: &str) -> Result<AthleteProfile> {
        let profile = self
            .profile(athlete_id)?
            .unwrap_or_else(|| AthleteProfile::empty(athlete_id));

        let mut doc = serde_json::to_value(&profile)?;
        let Value::Object(update_map) = updates else {
            return Err(eyre!("Profile updates must be a JSON object"));
        };
        let Value::Object(ref mut base) = doc else {
            return Err(eyre!("Profile did not serialize to a JSON object"));
        };

        for (key, value) in update_map {
            match (base.get_mut(&key), value) {
                (Some(Value::Object(existing)), Value::Object(update)) => {
                    for (k, v) in update {
                        existing.insert(k, v);
                    }
                }
                (Some(Value::Array(existing)), Value::Array(update)) => {
                    existing.extend(update);
                }
                (_, value) => {
                    base.insert(key, value);
                }
            }
        }

        let merged: AthleteProfile =
            serde_json::from_value(doc).map_err(|e| eyre!("Update would produce an invalid profile: {}", e))?;
        self.save_profile(merged, athlete_id)
    }

    /// Get session notes for an athlete, most recent first
    pub fn session_notes(&self, athlete_id: &str) -> Result<Vec<SessionNote>> {
        Ok(self.docs.load_json(&Self::notes_file(athlete_id))?.unwrap_or_default())
    }

    /// Add a session note, pruning the list to the configured cap
    pub fn add_session_note(
        &self,
        note_type: NoteType,
        content: Map<String, Value>,
        athlete_id: &str,
    ) -> Result<SessionNote> {
        let note = SessionNote {
            timestamp: now_iso(),
            athlete_id: athlete_id.to_string(),
            note_type,
            content,
        };

        let mut notes = self.session_notes(athlete_id)?;
        notes.insert(0, note.clone());
        notes.truncate(self.max_notes);

        self.docs.save_json(&Self::notes_file(athlete_id), &notes)?;
        debug!(athlete_id, %note_type, "Added session note");
        Ok(note)
    }

    /// Get plan adjustments for an athlete, most recent first
    pub fn plan_adjustments(&self, athlete_id: &str) -> Result<Vec<PlanAdjustment>> {
        Ok(self
            .docs
            .load_json(&Self::adjustments_file(athlete_id))?
            .unwrap_or_default())
    }

    /// Record a plan adjustment
    pub fn add_plan_adjustment(
        &self,
        plan_id: &str,
        change_description: &str,
        reason: &str,
        athlete_id: &str,
    ) -> Result<PlanAdjustment> {
        let adjustment = PlanAdjustment {
            timestamp: now_iso(),
            athlete_id: athlete_id.to_string(),
            plan_id: plan_id.to_string(),
            change_description: change_description.to_string(),
            reason: reason.to_string(),
        };

        let mut adjustments = self.plan_adjustments(athlete_id)?;
        adjustments.insert(0, adjustment.clone());

        self.docs.save_json(&Self::adjustments_file(athlete_id), &adjustments)?;
        debug!(athlete_id, plan_id, "Recorded plan adjustment");
        Ok(adjustment)
    }
}
